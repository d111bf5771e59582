use clap::Parser;
use std::path::PathBuf;

/// Single-branch ATM simulator over a flat-file record store
#[derive(Parser, Debug)]
#[command(name = "atm-engine")]
#[command(about = "Single-branch ATM simulator over a flat-file record store", long_about = None)]
pub struct CliArgs {
    /// Path of the persisted account record store
    #[arg(
        long = "accounts-file",
        value_name = "PATH",
        default_value = "accounts.dat",
        help = "Path to the account record store"
    )]
    pub accounts_file: PathBuf,

    /// Directory holding the per-account journal files
    #[arg(
        long = "journal-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory holding per-account journal files"
    )]
    pub journal_dir: PathBuf,

    /// Recreate the record store with the demo accounts and exit
    #[arg(long, help = "Truncate the store, seed the demo accounts, and exit")]
    pub seed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::all_defaults(&["program"], "accounts.dat", ".", false)]
    #[case::custom_store(&["program", "--accounts-file", "branch.dat"], "branch.dat", ".", false)]
    #[case::custom_journal_dir(&["program", "--journal-dir", "logs"], "accounts.dat", "logs", false)]
    #[case::seed_flag(&["program", "--seed"], "accounts.dat", ".", true)]
    #[case::everything(
        &["program", "--accounts-file", "branch.dat", "--journal-dir", "logs", "--seed"],
        "branch.dat",
        "logs",
        true
    )]
    fn test_argument_parsing(
        #[case] args: &[&str],
        #[case] accounts_file: &str,
        #[case] journal_dir: &str,
        #[case] seed: bool,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.accounts_file, Path::new(accounts_file));
        assert_eq!(parsed.journal_dir, Path::new(journal_dir));
        assert_eq!(parsed.seed, seed);
    }

    #[rstest]
    #[case::missing_value(&["program", "--accounts-file"])]
    #[case::unknown_flag(&["program", "--no-such-flag"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
