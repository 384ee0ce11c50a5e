mod show;
mod vars;
mod watch;

pub use show::cmd_show;
pub use vars::cmd_vars;
pub use watch::cmd_watch;
