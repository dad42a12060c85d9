//! Analysis profile listing.

use clap::Args;
use tonalert_config::{
    FACTORY_PROFILE_NAMES, Profile, factory_profiles, list_user_profiles, paths,
    resolve_profile, user_profiles_dir,
};

/// List analysis profiles, or show one in full.
#[derive(Args)]
pub struct ProfilesArgs {
    /// Profile name or path to show
    pub name: Option<String>,
}

/// Run the profiles command.
pub fn run(args: ProfilesArgs) -> anyhow::Result<()> {
    match args.name {
        Some(name) => show(&name),
        None => {
            list();
            Ok(())
        }
    }
}

fn list() {
    println!("Factory profiles:");
    for profile in factory_profiles() {
        print_entry(&profile);
    }

    let user = list_user_profiles();
    println!();
    println!("User profiles ({}):", user_profiles_dir().display());
    if user.is_empty() {
        println!("  (none)");
    }
    for path in user {
        match Profile::load(&path) {
            Ok(profile) => print_entry(&profile),
            Err(e) => {
                let name = paths::profile_name_from_path(&path).unwrap_or_default();
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable profile");
                println!("  {name:<12} (unreadable)");
            }
        }
    }
}

fn print_entry(profile: &Profile) {
    println!(
        "  {:<12} {}",
        profile.name,
        profile.description.as_deref().unwrap_or("")
    );
}

fn show(name: &str) -> anyhow::Result<()> {
    let profile = resolve_profile(name).map_err(|e| {
        anyhow::anyhow!(
            "{e}. Factory profiles: {}",
            FACTORY_PROFILE_NAMES.join(", ")
        )
    })?;
    let config = profile.to_analysis_config()?;

    print!("{}", profile.to_toml()?);
    println!();
    println!(
        "# effective warning level: {:.2} {}",
        config.warning_threshold_db(),
        config.scale()
    );
    Ok(())
}
