use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn password(&self) -> String;
    fn port(&self) -> String;
    fn data_dir(&self) -> Option<PathBuf>;
    fn require_phone(&self) -> bool;
}
