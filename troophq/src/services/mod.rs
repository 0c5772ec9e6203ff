pub mod login_guard;
pub mod privilege;
pub mod session;

pub use login_guard::LoginAttemptGuard;
pub use privilege::PrivilegeService;
pub use session::SessionService;
