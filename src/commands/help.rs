use anyhow::Result;
use console::style;

use super::Command;
use crate::{app::context::AppContext, cli::help_text};

pub struct HelpCommand {
    /// Show the repository status banner above the help.
    pub banner: bool,
}

impl Command for HelpCommand {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        if self.banner {
            println!("{}", status_banner(ctx));
        }
        print!("{}", help_text());
        Ok(())
    }
}

fn status_banner(ctx: &AppContext) -> String {
    let repo = if ctx.git_initialized {
        style("git repository").green().to_string()
    } else {
        style("not under version control").yellow().to_string()
    };
    let mut out = format!(
        "Cura configuration: {}\nStatus: {repo}\n",
        ctx.config_dir.display()
    );
    if !ctx.git_initialized {
        out.push_str("Run `cura-sync init <url>` to publish it or `cura-sync clone <url>` to fetch one.\n");
    }
    out
}
