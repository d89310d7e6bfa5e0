use clap::Parser;

/// Arguments for the describe command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the packaged descriptor:\n    rtdep describe\n\n\
                  Machine-readable output:\n    rtdep describe --json")]
pub struct DescribeArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}
