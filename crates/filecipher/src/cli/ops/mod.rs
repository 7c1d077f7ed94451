pub mod files;
pub mod init;
pub mod submit;
pub mod version;

pub use files::Files;
pub use init::Init;
pub use submit::Submit;
pub use version::Version;
