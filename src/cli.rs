use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "unpress", version, about = "Migrate a WordPress export into a static-site-ready corpus")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert exported posts, localizing their media references
    Convert(ConvertArgs),
    /// List the published posts in an export
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// WordPress export (WXR) XML file
    #[arg(long, value_name = "FILE")]
    pub export: PathBuf,
    /// Root of the exported media directory tree
    #[arg(long, value_name = "DIR")]
    pub media: PathBuf,
    /// Directory converted posts are written to [default: _posts]
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,
    /// Root of the site images tree [default: sibling `images` of the output directory]
    #[arg(long, value_name = "DIR")]
    pub images: Option<PathBuf>,
    /// Only convert these post IDs (comma-separated)
    #[arg(long = "post-ids", value_name = "IDS", value_delimiter = ',')]
    pub post_ids: Vec<String>,
    /// Only convert posts published on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,
    /// Only convert posts published on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,
    /// Convert the rewritten HTML to Markdown
    #[arg(long)]
    pub markdown: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// WordPress export (WXR) XML file
    #[arg(long, value_name = "FILE")]
    pub export: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_post_ids_are_comma_separated() {
        let cli = Cli::parse_from(["unpress", "convert", "--export", "e.xml", "--media", "m", "--post-ids", "7,9"]);
        let Command::Convert(args) = cli.command else { panic!("expected convert") };
        assert_eq!(args.post_ids, ["7", "9"]);
    }
}
