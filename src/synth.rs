//! Manifest synthesis command.
//!
//! Renders the stack's resource manifest as JSON. With `--output`, the file
//! is only rewritten when its content digest differs from the freshly
//! rendered template; `--check` reports staleness without writing. The
//! manifest goes to stdout when no output path is given, and the summary
//! always goes to stderr so stdout stays parseable for scripts.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config::Config;
use crate::stack::{build_stack, DeployEnv};
use crate::template::{digest_hex, Template};

pub fn run_synth(config: &Config, output: Option<&Path>, check: bool) -> Result<()> {
    let env = DeployEnv::from_env();
    let stack = build_stack(config, &env)?;
    let resource_count = stack.graph.len();
    let template = Template::render(&stack)?;
    let json = template.to_json_pretty()?;
    let digest = digest_hex(&json);

    let Some(path) = output else {
        if check {
            bail!("--check requires --output");
        }
        print!("{}", json);
        eprintln!(
            "synthesized {} ({} resources, region {}, digest {})",
            stack.name,
            resource_count,
            env.region,
            short(&digest)
        );
        return Ok(());
    };

    let existing = std::fs::read_to_string(path).ok();
    let up_to_date = existing.as_deref().map(digest_hex) == Some(digest.clone());

    if check {
        if up_to_date {
            eprintln!("{} is up to date (digest {})", path.display(), short(&digest));
            return Ok(());
        }
        bail!(
            "{} is stale or missing; re-run `cmsite synth --output {}`",
            path.display(),
            path.display()
        );
    }

    if up_to_date {
        eprintln!("{} unchanged (digest {})", path.display(), short(&digest));
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &json)?;
    eprintln!(
        "wrote {} ({} resources, region {}, digest {})",
        path.display(),
        resource_count,
        env.region,
        short(&digest)
    );

    Ok(())
}

fn short(digest: &str) -> &str {
    &digest[..digest.len().min(12)]
}
