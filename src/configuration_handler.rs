use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "court_booking", about = "Tennis court booking service")]
pub struct ConfigurationHandler {
    /// Password expected in the x-admin-password header of admin requests.
    /// A placeholder equality check, not a security boundary.
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "1234")]
    password: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    port: String,

    /// Directory for the flat-file store. Slots and bookings live only in
    /// memory when unset.
    #[arg(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Reject bookings that do not carry a phone number.
    #[arg(long, env = "REQUIRE_PHONE", default_value_t = false)]
    require_phone: bool,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn password(&self) -> String {
        self.password.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone()
    }

    fn require_phone(&self) -> bool {
        self.require_phone
    }
}
