use std::env;
use std::fs;
use std::process;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;

use k8_roles::RoleManifest;
use k8_workload::deployment;
use k8_workload::stateful_set;
use k8_workload::ExportSettings;

const USAGE: &str = "usage: k8-export-util <manifest.yml> <role> [--stateful] [--helm]";

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut stateful = false;
    let mut helm = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--stateful" => stateful = true,
            "--helm" => helm = true,
            _ => positional.push(arg),
        }
    }
    if positional.len() != 2 {
        bail!("{}", USAGE);
    }
    let (manifest_path, role_name) = (&positional[0], &positional[1]);

    let content =
        fs::read_to_string(manifest_path).with_context(|| format!("reading {}", manifest_path))?;
    let manifest = RoleManifest::from_yaml(&content)?;
    let role = manifest
        .role(role_name)
        .with_context(|| format!("no role {} in {}", role_name, manifest_path))?;

    let settings = ExportSettings {
        create_helm_chart: helm,
        ..Default::default()
    };

    let (workload, services) = if stateful {
        stateful_set(Some(role), &settings)?
    } else {
        deployment(role, &settings)?
    };

    print!("{}", serde_yaml::to_string(&workload)?);
    println!("---");
    print!("{}", serde_yaml::to_string(&services)?);
    Ok(())
}
