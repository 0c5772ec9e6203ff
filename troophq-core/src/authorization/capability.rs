use serde::{Deserialize, Serialize};

/// Categories the capability catalog is grouped into, mostly used by the
/// permission-editing screens of the admin UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum CapabilityCategory {
    Membership,
    Advancement,
    Calendar,
    Fundraising,
    Donations,
    Goals,
    Data,
}

impl CapabilityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityCategory::Membership => "membership",
            CapabilityCategory::Advancement => "advancement",
            CapabilityCategory::Calendar => "calendar",
            CapabilityCategory::Fundraising => "fundraising",
            CapabilityCategory::Donations => "donations",
            CapabilityCategory::Goals => "goals",
            CapabilityCategory::Data => "data",
        }
    }
}

/// Named permissions gating one kind of action each
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum Capability {
    // Membership
    ViewRoster,
    ManageMembers,
    InviteMembers,
    ManageHouseholds,
    // Advancement
    ViewBadges,
    AwardBadges,
    ManageBadgeCatalog,
    TrackRequirements,
    // Calendar
    ViewEvents,
    ManageEvents,
    RsvpEvents,
    ManageBoothEvents,
    // Fundraising
    ViewSales,
    RecordSales,
    ManageSales,
    TransferInventory,
    // Donations
    ViewDonations,
    RecordDonations,
    ManageDonations,
    // Goals
    ViewGoals,
    SetGoals,
    ManageTroopGoals,
    // Data & settings
    ViewReports,
    ExportData,
    ImportData,
    ManageSettings,
    ManageTroop,
}

impl Capability {
    /// Get the full catalog in display order
    pub fn all() -> Vec<Capability> {
        vec![
            Capability::ViewRoster,
            Capability::ManageMembers,
            Capability::InviteMembers,
            Capability::ManageHouseholds,
            Capability::ViewBadges,
            Capability::AwardBadges,
            Capability::ManageBadgeCatalog,
            Capability::TrackRequirements,
            Capability::ViewEvents,
            Capability::ManageEvents,
            Capability::RsvpEvents,
            Capability::ManageBoothEvents,
            Capability::ViewSales,
            Capability::RecordSales,
            Capability::ManageSales,
            Capability::TransferInventory,
            Capability::ViewDonations,
            Capability::RecordDonations,
            Capability::ManageDonations,
            Capability::ViewGoals,
            Capability::SetGoals,
            Capability::ManageTroopGoals,
            Capability::ViewReports,
            Capability::ExportData,
            Capability::ImportData,
            Capability::ManageSettings,
            Capability::ManageTroop,
        ]
    }

    /// Convert to the code used in privilege configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewRoster => "view_roster",
            Capability::ManageMembers => "manage_members",
            Capability::InviteMembers => "invite_members",
            Capability::ManageHouseholds => "manage_households",
            Capability::ViewBadges => "view_badges",
            Capability::AwardBadges => "award_badges",
            Capability::ManageBadgeCatalog => "manage_badge_catalog",
            Capability::TrackRequirements => "track_requirements",
            Capability::ViewEvents => "view_events",
            Capability::ManageEvents => "manage_events",
            Capability::RsvpEvents => "rsvp_events",
            Capability::ManageBoothEvents => "manage_booth_events",
            Capability::ViewSales => "view_sales",
            Capability::RecordSales => "record_sales",
            Capability::ManageSales => "manage_sales",
            Capability::TransferInventory => "transfer_inventory",
            Capability::ViewDonations => "view_donations",
            Capability::RecordDonations => "record_donations",
            Capability::ManageDonations => "manage_donations",
            Capability::ViewGoals => "view_goals",
            Capability::SetGoals => "set_goals",
            Capability::ManageTroopGoals => "manage_troop_goals",
            Capability::ViewReports => "view_reports",
            Capability::ExportData => "export_data",
            Capability::ImportData => "import_data",
            Capability::ManageSettings => "manage_settings",
            Capability::ManageTroop => "manage_troop",
        }
    }

    /// Parse from a capability code
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Capability> {
        match s.to_lowercase().as_str() {
            "view_roster" => Some(Capability::ViewRoster),
            "manage_members" => Some(Capability::ManageMembers),
            "invite_members" => Some(Capability::InviteMembers),
            "manage_households" => Some(Capability::ManageHouseholds),
            "view_badges" => Some(Capability::ViewBadges),
            "award_badges" => Some(Capability::AwardBadges),
            "manage_badge_catalog" => Some(Capability::ManageBadgeCatalog),
            "track_requirements" => Some(Capability::TrackRequirements),
            "view_events" => Some(Capability::ViewEvents),
            "manage_events" => Some(Capability::ManageEvents),
            "rsvp_events" => Some(Capability::RsvpEvents),
            "manage_booth_events" => Some(Capability::ManageBoothEvents),
            "view_sales" => Some(Capability::ViewSales),
            "record_sales" => Some(Capability::RecordSales),
            "manage_sales" => Some(Capability::ManageSales),
            "transfer_inventory" => Some(Capability::TransferInventory),
            "view_donations" => Some(Capability::ViewDonations),
            "record_donations" => Some(Capability::RecordDonations),
            "manage_donations" => Some(Capability::ManageDonations),
            "view_goals" => Some(Capability::ViewGoals),
            "set_goals" => Some(Capability::SetGoals),
            "manage_troop_goals" => Some(Capability::ManageTroopGoals),
            "view_reports" => Some(Capability::ViewReports),
            "export_data" => Some(Capability::ExportData),
            "import_data" => Some(Capability::ImportData),
            "manage_settings" => Some(Capability::ManageSettings),
            "manage_troop" => Some(Capability::ManageTroop),
            _ => None,
        }
    }

    /// Human readable name shown in the admin UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Capability::ViewRoster => "View roster",
            Capability::ManageMembers => "Manage members",
            Capability::InviteMembers => "Invite members",
            Capability::ManageHouseholds => "Manage households",
            Capability::ViewBadges => "View badges",
            Capability::AwardBadges => "Award badges",
            Capability::ManageBadgeCatalog => "Manage badge catalog",
            Capability::TrackRequirements => "Track requirements",
            Capability::ViewEvents => "View events",
            Capability::ManageEvents => "Manage events",
            Capability::RsvpEvents => "RSVP to events",
            Capability::ManageBoothEvents => "Manage booth events",
            Capability::ViewSales => "View sales",
            Capability::RecordSales => "Record sales",
            Capability::ManageSales => "Manage sales",
            Capability::TransferInventory => "Transfer inventory",
            Capability::ViewDonations => "View donations",
            Capability::RecordDonations => "Record donations",
            Capability::ManageDonations => "Manage donations",
            Capability::ViewGoals => "View goals",
            Capability::SetGoals => "Set goals",
            Capability::ManageTroopGoals => "Manage troop goals",
            Capability::ViewReports => "View reports",
            Capability::ExportData => "Export data",
            Capability::ImportData => "Import data",
            Capability::ManageSettings => "Manage settings",
            Capability::ManageTroop => "Manage troop",
        }
    }

    pub fn category(&self) -> CapabilityCategory {
        match self {
            Capability::ViewRoster
            | Capability::ManageMembers
            | Capability::InviteMembers
            | Capability::ManageHouseholds => CapabilityCategory::Membership,
            Capability::ViewBadges
            | Capability::AwardBadges
            | Capability::ManageBadgeCatalog
            | Capability::TrackRequirements => CapabilityCategory::Advancement,
            Capability::ViewEvents
            | Capability::ManageEvents
            | Capability::RsvpEvents
            | Capability::ManageBoothEvents => CapabilityCategory::Calendar,
            Capability::ViewSales
            | Capability::RecordSales
            | Capability::ManageSales
            | Capability::TransferInventory => CapabilityCategory::Fundraising,
            Capability::ViewDonations
            | Capability::RecordDonations
            | Capability::ManageDonations => CapabilityCategory::Donations,
            Capability::ViewGoals | Capability::SetGoals | Capability::ManageTroopGoals => {
                CapabilityCategory::Goals
            }
            Capability::ViewReports
            | Capability::ExportData
            | Capability::ImportData
            | Capability::ManageSettings
            | Capability::ManageTroop => CapabilityCategory::Data,
        }
    }

    pub fn info(&self) -> CapabilityInfo {
        CapabilityInfo {
            code: self.as_str().to_string(),
            display_name: self.display_name().to_string(),
            category: self.category(),
        }
    }
}

/// Serializable catalog entry, consumed read-only by the admin UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct CapabilityInfo {
    pub code: String,
    pub display_name: String,
    pub category: CapabilityCategory,
}
