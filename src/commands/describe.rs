//! Describe command implementation

use console::Style;
use serde::Serialize;

use crate::cli::{Cli, DescribeArgs};
use crate::config::{BootstrapConfig, DependencyMode};
use crate::descriptor::{DependencyCoordinate, RepositoryDescriptor, RuntimeDescriptor};
use crate::error::Result;
use crate::remote::with_default_repository;

/// What a run of this package would do
#[derive(Debug, Serialize)]
struct Description {
    package: String,
    config: BootstrapConfig,
    dependencies: Vec<DescribedDependency>,
    repositories: Vec<RepositoryDescriptor>,
}

#[derive(Debug, Serialize)]
struct DescribedDependency {
    coordinate: String,
    file_name: String,
}

pub fn run(cli: &Cli, args: &DescribeArgs) -> Result<()> {
    let package = super::open_package(cli)?;
    let config = super::load_config(cli, &package)?;
    let descriptor = package.descriptor()?;

    let description = describe(
        package.root().display().to_string(),
        config,
        &descriptor,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&description)?);
    } else {
        print_description(&description);
    }
    Ok(())
}

fn describe(package: String, config: BootstrapConfig, descriptor: &RuntimeDescriptor) -> Description {
    let dependencies = descriptor
        .dependencies
        .iter()
        .map(|coord: &DependencyCoordinate| DescribedDependency {
            coordinate: coord.to_string(),
            file_name: coord.file_name(&config.extension),
        })
        .collect();

    let repositories = if config.mode == DependencyMode::Remote && config.default_repository {
        with_default_repository(&descriptor.repositories)
    } else {
        descriptor.repositories.clone()
    };

    Description {
        package,
        config,
        dependencies,
        repositories,
    }
}

fn print_description(description: &Description) {
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    let config = &description.config;

    println!("{} {}", bold.apply_to("Package:"), description.package);
    println!("{} {}", bold.apply_to("Mode:"), Style::new().green().apply_to(config.mode));
    println!(
        "{} {}",
        bold.apply_to("Entry point:"),
        config.entry_point.as_deref().unwrap_or("(not set)")
    );
    match config.mode {
        DependencyMode::Local => {
            println!("{} {}", bold.apply_to("Library path:"), config.library_path.display());
        }
        DependencyMode::Remote => {
            let cache_dir = config
                .cache_dir()
                .map_or_else(|e| e.to_string(), |dir| dir.display().to_string());
            println!("{} {}", bold.apply_to("Cache directory:"), cache_dir);
        }
    }
    println!("{} {}", bold.apply_to("Extension:"), config.extension);

    if description.dependencies.is_empty() {
        println!("{} {}", bold.apply_to("Dependencies:"), dim.apply_to("None"));
    } else {
        println!("{}", bold.apply_to("Dependencies:"));
        for dep in &description.dependencies {
            println!(
                "  - {} {}",
                Style::new().cyan().apply_to(&dep.coordinate),
                dim.apply_to(format!("({})", dep.file_name))
            );
        }
    }

    if description.repositories.is_empty() {
        println!("{} {}", bold.apply_to("Repositories:"), dim.apply_to("None"));
    } else {
        println!("{}", bold.apply_to("Repositories:"));
        for repo in &description.repositories {
            let auth = if repo.wants_credentials() {
                format!(" (credentials: {}_USERNAME)", repo.credential_env_prefix)
            } else {
                String::new()
            };
            println!(
                "  - {} {}{}",
                Style::new().cyan().apply_to(&repo.name),
                repo.url,
                dim.apply_to(auth)
            );
        }
    }
}
