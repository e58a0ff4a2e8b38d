use anyhow::{Result, bail};
use colored::Colorize;
use packit::auth::{AuthFile, authenticate};
use packit::client::ApiClient;
use packit::error::PackitError;
use packit::flatten::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE, flatten_project};
use packit::key::{parse_key, resolve_key};
use packit::manifest::{PackageManifest, is_valid_version};
use packit::template::{copy_template, get_template_names, get_templates_dir};
use packit::util::{get_auth_file, get_manifest_file, prompt_confirm, prompt_line, prompt_select};
use crate::cli::{CLI, PackageTask, PackitCommand};

pub fn execute(cli: CLI) -> Result<()> {
    match cli.command {
        PackitCommand::Init { name, template, force, skip } => {
            execute_init(name, template, force, skip)
        }
        PackitCommand::Login { token } => {
            execute_login(&token)
        }
        PackitCommand::Logout => {
            execute_logout()
        }
        PackitCommand::Package { task } => {
            match task {
                PackageTask::Upload => execute_upload(),
                PackageTask::Remove { name, version } => execute_remove(name, version),
                PackageTask::List => execute_list(),
            }
        }
        PackitCommand::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

pub fn execute_init(
    name: Option<String>,
    template: Option<String>,
    force: bool,
    skip: bool,
) -> Result<()> {
    let templates_dir = get_templates_dir()?;
    let template_names = get_template_names(&templates_dir)?;
    if template_names.is_empty() {
        bail!("No templates found. Please reinstall the CLI or check your installation.");
    }

    let name = match name {
        Some(name) => name,
        None if skip => "my-app".to_string(),
        None => prompt_line("Package name:", "my-app")?,
    };
    if name.trim().is_empty() {
        bail!("Name cannot be empty");
    }

    let template = match template {
        Some(template) if template_names.contains(&template) => template,
        Some(template) if skip => {
            return Err(PackitError::TemplateNotFound(template).into());
        }
        None if skip => "default".to_string(),
        _ => {
            let chosen = prompt_select("Select a template:", &template_names)?;
            println!("Selected template: {}", chosen);
            chosen
        }
    };

    let target_dir = std::env::current_dir()?.join(&name);
    let mut force = force;
    if target_dir.exists() && !force && !skip {
        let overwrite = prompt_confirm(
            &format!("Directory \"{}\" already exists. Overwrite?", name),
        )?;
        if !overwrite {
            return Err(PackitError::Aborted.into());
        }
        force = true;
    }

    println!("Initializing new package...");
    copy_template(&templates_dir, &name, &target_dir, &template, force)?;
    println!(
        "{}",
        format!(
            "Project created from \"{}\" template at {}",
            template,
            target_dir.display()
        ).green()
    );
    Ok(())
}

pub fn execute_login(access_token: &str) -> Result<()> {
    println!("Authenticating...");
    let auth_path = get_auth_file()?;
    if AuthFile::exists(&auth_path) {
        return Err(PackitError::AlreadyAuthenticated.into());
    }
    // Reject bad tokens before persisting anything.
    let client = ApiClient::new();
    client.exchange_access_token(access_token)?;

    AuthFile::new(access_token).save(&auth_path)?;
    println!("{}", "Authenticated successfully".green());
    Ok(())
}

pub fn execute_logout() -> Result<()> {
    let auth_path = get_auth_file()?;
    if !AuthFile::exists(&auth_path) {
        return Err(PackitError::NotAuthenticated.into());
    }
    AuthFile::delete(&auth_path)?;
    println!("Logged out successfully.");
    Ok(())
}

pub fn execute_upload() -> Result<()> {
    // Validate the manifest before authenticating or walking the tree, so a
    // broken package.json fails before any network round-trip.
    println!("(1/4) Reading package.json...");
    let manifest = PackageManifest::load(get_manifest_file()?)?;
    manifest.validate()?;
    if !is_valid_version(&manifest.version) {
        eprintln!(
            "{}",
            format!("warning: '{}' is not a semantic version", manifest.version).yellow()
        );
    }

    println!("(2/4) Authenticating...");
    let client = ApiClient::new();
    let user_uid = authenticate(&client)?;

    println!("(3/4) Reading project files...");
    let cwd = std::env::current_dir()?;
    let code = flatten_project(&cwd, DEFAULT_INCLUDE, DEFAULT_EXCLUDE)?;

    println!("(4/4) Uploading package...");
    let key = resolve_key(&manifest.name, &manifest.version);
    client.put_package(&user_uid, &key, &code)?;
    println!("{}", "Package uploaded successfully.".green());
    Ok(())
}

pub fn execute_remove(name: Option<String>, version: Option<String>) -> Result<()> {
    let (name, version) = match (name, version) {
        (Some(name), Some(version)) => (name, version),
        (None, None) => {
            let manifest = PackageManifest::load(get_manifest_file()?)?;
            manifest.validate()?;
            (manifest.name, manifest.version)
        }
        _ => bail!("Please provide both --name and --version or neither."),
    };

    println!("(1/2) Authenticating...");
    let client = ApiClient::new();
    let user_uid = authenticate(&client)?;

    println!("(2/2) Removing package...");
    let key = resolve_key(&name, &version);
    if client.get_package(&user_uid, &key)?.is_none() {
        return Err(PackitError::RecordNotFound.into());
    }
    client.delete_package(&user_uid, &key)?;
    println!("{}", "Package removed successfully.".green());
    Ok(())
}

pub fn execute_list() -> Result<()> {
    println!("(1/2) Authenticating...");
    let client = ApiClient::new();
    let user_uid = authenticate(&client)?;

    println!("(2/2) Listing packages...");
    let keys = client.list_packages(&user_uid)?;
    if keys.is_empty() {
        println!("No packages found.");
        return Ok(());
    }
    for key in keys {
        match parse_key(&key) {
            Some((name, version)) => println!("Package: {} (v{})", name, version),
            // A key the encoding can't invert is still worth showing raw.
            None => println!("Package: {}", key),
        }
    }
    Ok(())
}
