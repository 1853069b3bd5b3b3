//! Command handlers

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use quote_core::materials::{
    custom_colors, custom_surfaces, material_constraints, stock_colors, stock_surfaces,
    MaterialConstraints, CUSTOM_MATERIALS, STOCK_MATERIALS,
};
use quote_core::settings::{save_customers, save_items, CustomerUpdate};
use quote_core::{calculate_quote, load_settings, QuoteLog, QuoteRequest, Settings, SettingsPaths};

use crate::{Cli, Commands, QuotesCommand};

/// Options for one material, as shown by `materials`
#[derive(Debug, Serialize)]
struct MaterialOptions {
    material: String,
    custom: Option<CustomOptions>,
    stock_colors: &'static [&'static str],
    stock_surfaces: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct CustomOptions {
    constraints: MaterialConstraints,
    colors: &'static [&'static str],
    surfaces: &'static [&'static str],
}

fn material_options(material: &str) -> MaterialOptions {
    MaterialOptions {
        material: material.to_string(),
        custom: material_constraints(material).map(|constraints| CustomOptions {
            constraints,
            colors: custom_colors(material),
            surfaces: custom_surfaces(material),
        }),
        stock_colors: stock_colors(material),
        stock_surfaces: stock_surfaces(material),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load(paths: &SettingsPaths, root: &Path) -> Result<Settings> {
    load_settings(paths).with_context(|| format!("Failed to load settings from {}", root.display()))
}

fn read_request(path: &Path) -> Result<QuoteRequest> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&contents).with_context(|| format!("Invalid quote request in {}", path.display()))
}

pub fn run(cli: &Cli) -> Result<()> {
    let paths = SettingsPaths::from_root(&cli.settings_dir);

    match &cli.command {
        Commands::Quote { request, no_log } => {
            let settings = load(&paths, &cli.settings_dir)?;
            let request = read_request(request)?;
            let quote = calculate_quote(&request, &settings).context("Failed to price quote")?;

            if *no_log {
                print_json(&quote)
            } else {
                let log = QuoteLog::new(cli.quotes_path());
                let record = log
                    .append(&quote, cli.user.as_deref())
                    .with_context(|| format!("Failed to log quote to {}", log.path().display()))?;
                print_json(&record)
            }
        }

        Commands::Quotes { command } => {
            let log = QuoteLog::new(cli.quotes_path());
            match command {
                QuotesCommand::List => print_json(&log.summaries()),
                QuotesCommand::Show { id } => match log.get(*id) {
                    Some(record) => print_json(&record),
                    None => bail!("Quote not found: {}", id),
                },
            }
        }

        Commands::Customers => print_json(&load(&paths, &cli.settings_dir)?.customer_summaries()),

        Commands::Items => print_json(&load(&paths, &cli.settings_dir)?.item_summaries()),

        Commands::Materials { material } => match material {
            Some(material) => print_json(&material_options(material)),
            None => {
                let mut names: Vec<&str> = STOCK_MATERIALS.to_vec();
                for custom in CUSTOM_MATERIALS {
                    if !names.iter().any(|n| n.eq_ignore_ascii_case(custom)) {
                        names.push(custom);
                    }
                }
                let options: Vec<MaterialOptions> = names.into_iter().map(material_options).collect();
                print_json(&options)
            }
        },

        Commands::CustomerSet {
            id,
            name,
            column_break,
            freight_offset,
        } => {
            let mut settings = load(&paths, &cli.settings_dir)?;
            let update = CustomerUpdate {
                name: name.clone(),
                column_break: column_break.clone(),
                freight_column_offset: *freight_offset,
            };
            let customer = settings.upsert_customer(id, update)?.clone();
            save_customers(&paths, &settings).context("Failed to save customers")?;
            print_json(&customer)
        }

        Commands::ItemDescribe { sku, description } => {
            let mut settings = load(&paths, &cli.settings_dir)?;
            let item = settings.update_item_description(sku, description.as_str())?.clone();
            save_items(&paths, &settings).context("Failed to save items")?;
            print_json(&item)
        }
    }
}
