use std::collections::{HashMap, HashSet};

use sea_orm_migration::MigratorTrait;

/// Guard test to ensure all migrations have:
/// 1. Unique names
/// 2. A well-formed timestamped name: mYYYYMMDD_HHMMSS_description
///    - Date segment: 8 digits (YYYYMMDD)
///    - Time segment: 6 digits (HHMMSS)
///    - Description: lowercase alphanumeric + underscores, at least 1 char
#[test]
fn migration_names_are_unique_and_well_formed() {
    use vin_proxy::database::migrations::Migrator;

    let migrations = Migrator::migrations();
    assert!(!migrations.is_empty(), "no migrations registered");

    let mut seen: HashSet<String> = HashSet::new();
    let mut duplicates: HashMap<String, usize> = HashMap::new();
    let mut invalid: Vec<String> = Vec::new();

    for mig in migrations.iter() {
        let name = mig.name().to_string();

        if !is_valid_migration_name(&name) {
            invalid.push(name.clone());
        }

        if !seen.insert(name.clone()) {
            *duplicates.entry(name).or_insert(1) += 1;
        }
    }

    if !duplicates.is_empty() || !invalid.is_empty() {
        let mut msg = String::from("Migration naming guard failed:\n");

        for (name, count) in duplicates {
            msg.push_str(&format!("  duplicate: {} (occurrences: {})\n", name, count + 1));
        }
        for name in invalid {
            msg.push_str(&format!(
                "  invalid (expected mYYYYMMDD_HHMMSS_description): {}\n",
                name
            ));
        }

        panic!("{msg}");
    }
}

fn is_valid_migration_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('m') else {
        return false;
    };
    let parts: Vec<&str> = rest.split('_').collect();
    if parts.len() < 3 {
        return false;
    }

    let date = parts[0];
    let time = parts[1];
    let desc = parts[2..].join("_");

    date.len() == 8
        && date.chars().all(|c| c.is_ascii_digit())
        && time.len() == 6
        && time.chars().all(|c| c.is_ascii_digit())
        && !desc.is_empty()
        && desc
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
