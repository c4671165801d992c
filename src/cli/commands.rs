use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "twlist", about = concat!("[x] twlist v", env!("CARGO_PKG_VERSION"), " - a terminal task list for Taskwarrior"), version)]
pub struct Cli {
    /// Taskwarrior data directory [default: $HOME/.task]
    #[arg(long = "data-dir", value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Taskwarrior executable, by name or path
    #[arg(long = "task-bin", value_name = "PROGRAM", default_value = "task")]
    pub task_bin: String,

    /// Write diagnostic logs to this file (filter with TWLIST_LOG)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["twlist"]).unwrap();
        assert_eq!(cli.task_bin, "task");
        assert!(cli.data_dir.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "twlist",
            "--data-dir",
            "/tmp/tw",
            "--task-bin",
            "/opt/bin/task",
            "--log-file",
            "/tmp/twlist.log",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/tw")));
        assert_eq!(cli.task_bin, "/opt/bin/task");
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/twlist.log")));
    }

    #[test]
    fn rejects_subcommands() {
        assert!(Cli::try_parse_from(["twlist", "list"]).is_err());
    }
}
