//! # Validate-Definition Subcommand
//!
//! Structurally checks a topology: the built-in booking collaboration,
//! or a YAML definition file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use choreo_topology::{booking_collaboration, ProcessDefinition};

/// Arguments for the validate-definition subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// YAML definition file to check instead of the built-in topology.
    #[arg(long)]
    pub definition: Option<PathBuf>,
}

/// Load (or pick) the definition and run its structural checks.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let (definition, source) = match &args.definition {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let parsed: ProcessDefinition = serde_yaml::from_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?;
            (parsed, path.display().to_string())
        }
        None => (booking_collaboration(), "built-in booking collaboration".to_string()),
    };

    definition.validate()?;
    println!("{source}: {} nodes, structurally valid", definition.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_definition_validates() {
        run(ValidateArgs { definition: None }).unwrap();
    }

    #[test]
    fn test_yaml_definition_roundtrip_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booking.yaml");
        let yaml = serde_yaml::to_string(&booking_collaboration()).unwrap();
        std::fs::write(&path, yaml).unwrap();
        run(ValidateArgs {
            definition: Some(path),
        })
        .unwrap();
    }

    #[test]
    fn test_garbage_definition_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "nodes: 12").unwrap();
        assert!(run(ValidateArgs {
            definition: Some(path),
        })
        .is_err());
    }
}
