use thiserror::Error;
use tracing::{info, warn};

use japbase_pricing::{
    domain::{
        catalog, compute_final_price, regions, resolve_markup, Dashboard, GeneratorSettings,
        InvalidSettings, MarkupResult, MarkupRule, PricingRecord, PricingSummary, RecordFilter,
        State,
    },
    util::{
        persistence::{load_settings, save_settings, settings_file, SettingsError},
        version::{current_version, version_label, APP_NAME},
    },
};

use crate::{Cli, Command, GenerateArgs, QuoteArgs, SettingsCommand, SettingsOverrides};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] InvalidSettings),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown state: {0}")]
    UnknownState(String),
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Quote(args) => quote(args),
        Command::Generate(args) => generate(args),
        Command::Regions => {
            print_regions();
            Ok(())
        }
        Command::Rules => {
            print_rules();
            Ok(())
        }
        Command::Settings(command) => settings(command),
        Command::Version => {
            match current_version() {
                Ok(version) => println!("{APP_NAME} {} ({version})", version_label()),
                Err(err) => {
                    warn!("{err}");
                    println!("{APP_NAME} {}", version_label());
                }
            }
            Ok(())
        }
    }
}

/// Resolved markup plus the final price when a base cost was given.
fn price_quote(args: &QuoteArgs) -> (MarkupResult, Option<f64>) {
    let result = resolve_markup(
        &args.state,
        &args.city,
        args.channel,
        args.category,
        args.origin,
    );
    let price = args
        .base_cost
        .map(|base_cost| compute_final_price(base_cost, result.multiplier));
    (result, price)
}

fn quote(args: QuoteArgs) -> Result<(), AppError> {
    let (result, price) = price_quote(&args);
    if result.is_fallback() {
        warn!(
            state = %args.state,
            city = %args.city,
            "no regional rule matched; default markup applied"
        );
    }

    println!("Markup:     {:.2}", result.multiplier);
    println!("Regra:      {}", result.explanation);
    if let (Some(base_cost), Some(price)) = (args.base_cost, price) {
        println!("Custo base: {base_cost:.2}");
        println!("Preço:      {price:.2}");
    }
    Ok(())
}

/// Layers the command-line overrides on top of `settings` and validates the
/// result.
fn apply_overrides(
    mut settings: GeneratorSettings,
    overrides: &SettingsOverrides,
) -> Result<GeneratorSettings, InvalidSettings> {
    if let Some(seed) = overrides.seed {
        settings.seed = seed;
    }
    if let Some(competitors) = overrides.competitors {
        settings.competitors = competitors;
    }
    if let Some(spread) = overrides.market_spread {
        settings.market_spread_pct = spread;
    }
    if let Some(tolerance) = overrides.tolerance {
        settings.alignment_tolerance_pct = tolerance;
    }
    settings.validate()?;
    Ok(settings)
}

fn build_filter(args: &GenerateArgs) -> Result<RecordFilter, AppError> {
    let state = args
        .state
        .as_deref()
        .map(|name| State::parse(name).ok_or_else(|| AppError::UnknownState(name.to_string())))
        .transpose()?;
    Ok(RecordFilter {
        state,
        city: args.city.clone(),
        channel: args.channel,
        category: args.category,
        origin: args.origin,
        ..RecordFilter::default()
    })
}

fn generate(args: GenerateArgs) -> Result<(), AppError> {
    let settings = apply_overrides(load_settings(), &args.overrides)?;
    let filter = build_filter(&args)?;

    let mut dashboard = Dashboard::new(settings, catalog::sample(args.measurements));
    let batch_id = dashboard.refresh()?.id;
    let records = dashboard.view(&filter, args.sort, args.desc);
    let summary = dashboard.summary(&filter);
    info!(batch = %batch_id, shown = records.len(), sort = args.sort.label(), "records ready");

    if args.json {
        let output = serde_json::json!({
            "batch": batch_id,
            "generated_at": dashboard.batch().map(|b| b.generated_at_label()),
            "records": records,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_records(&records);
        print_summary(&summary);
    }
    Ok(())
}

fn settings(command: SettingsCommand) -> Result<(), AppError> {
    match command {
        SettingsCommand::Show => {
            let settings = load_settings();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsCommand::Save(overrides) => {
            let settings = apply_overrides(load_settings(), &overrides)?;
            let path = save_settings(&settings)?;
            info!(path = %path.display(), "settings saved");
        }
        SettingsCommand::Path => match settings_file() {
            Some(path) => println!("{}", path.display()),
            None => return Err(SettingsError::StorageUnavailable.into()),
        },
    }
    Ok(())
}

fn print_regions() {
    for region in regions() {
        println!(
            "{:<10} {:<3} {}",
            region.state_name,
            region.abbreviation,
            region.cities.join(", ")
        );
    }
}

fn print_rules() {
    println!(
        "{:<3} {:<46} {:>7} {:>9} {:>8}",
        "#", "Regra", "Varejo", "Frotista", "Atacado"
    );
    for (idx, rule) in MarkupRule::ORDER.iter().enumerate() {
        let rates = rule.rates();
        let marker = if rule.surcharge().is_some() { " *" } else { "" };
        println!(
            "{:<3} {:<46} {:>7.2} {:>9.2} {:>8.2}{marker}",
            idx + 1,
            rule.description(),
            rates.retail,
            rates.fleet,
            rates.wholesale
        );
    }
    println!("* inclui acréscimo de 4% sobre a tabela de Belém");
}

fn print_records(records: &[&PricingRecord]) {
    println!(
        "{:<10} {:<9} {:<12} {:<9} {:<13} {:<12} {:>6} {:>10} {:>10} {:>9}",
        "ID", "UF", "Cidade", "Canal", "Medida", "Categoria", "Markup", "Custo", "Preço", "Mercado"
    );
    for record in records {
        println!(
            "{:<10} {:<9} {:<12} {:<9} {:<13} {:<12} {:>6.2} {:>10.2} {:>10.2} {:>9}",
            record.id,
            record.state.abbreviation(),
            record.city,
            record.channel.label(),
            record.size,
            record.category.label(),
            record.markup.multiplier,
            record.base_cost,
            record.final_price,
            record.market.position.label()
        );
    }
}

fn print_summary(summary: &PricingSummary) {
    println!();
    println!("Registros:        {}", summary.records);
    println!("Markup médio:     {:.3}", summary.average_multiplier);
    println!("Preço médio:      {:.2}", summary.average_final_price);
    println!(
        "Mercado:          {} abaixo / {} alinhado / {} acima",
        summary.below_market, summary.aligned_with_market, summary.above_market
    );
    if summary.fallback > 0 {
        println!("Regra padrão:     {}", summary.fallback);
    }
    for (state, count) in &summary.per_state {
        println!("  {:<10} {count}", state.name());
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use japbase_pricing::domain::{Channel, Origin};

    use super::*;

    fn generate_args(flags: &[&str]) -> GenerateArgs {
        let argv = ["japbase-pricing", "generate"].into_iter().chain(flags.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Generate(args) => args,
            _ => unreachable!(),
        }
    }

    fn quote_args(flags: &[&str]) -> QuoteArgs {
        let argv = ["japbase-pricing", "quote"].into_iter().chain(flags.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Quote(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_filter_from_flags() {
        let args = generate_args(&[
            "--state", "PA", "--city", "Belém", "--channel", "atacado", "--origin", "importado",
        ]);
        let filter = build_filter(&args).unwrap();
        assert_eq!(filter.state, Some(State::Para));
        assert_eq!(filter.city.as_deref(), Some("Belém"));
        assert_eq!(filter.channel, Some(Channel::Wholesale));
        assert_eq!(filter.origin, Some(Origin::Imported));
        assert_eq!(filter.category, None);
        assert!(!filter.only_fallback);
    }

    #[test]
    fn test_unknown_state_filter_is_an_error() {
        let args = generate_args(&["--state", "São Paulo"]);
        assert!(matches!(
            build_filter(&args),
            Err(AppError::UnknownState(name)) if name == "São Paulo"
        ));
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let args = generate_args(&["--seed", "7", "--market-spread", "0.2", "--tolerance", "0.05"]);
        let settings = apply_overrides(GeneratorSettings::default(), &args.overrides).unwrap();
        assert_eq!(
            settings,
            GeneratorSettings {
                seed: 7,
                market_spread_pct: 0.2,
                alignment_tolerance_pct: 0.05,
                ..GeneratorSettings::default()
            }
        );
        assert_eq!(
            apply_overrides(settings.clone(), &SettingsOverrides::default()),
            Ok(settings)
        );
    }

    #[test]
    fn test_out_of_range_overrides_are_rejected() {
        let args = generate_args(&["--market-spread", "5"]);
        assert_eq!(
            apply_overrides(GeneratorSettings::default(), &args.overrides),
            Err(InvalidSettings::MarketSpread(5.0))
        );
        let args = generate_args(&["--competitors", "0"]);
        assert_eq!(
            apply_overrides(GeneratorSettings::default(), &args.overrides),
            Err(InvalidSettings::Competitors(0))
        );
    }

    #[test]
    fn test_quote_prices_with_resolved_markup() {
        let args = quote_args(&[
            "--state", "Pará", "--city", "Parauapebas", "--channel", "varejo", "--category",
            "passeio", "--origin", "importado", "--base-cost", "100",
        ]);
        let (result, price) = price_quote(&args);
        assert_eq!(result.multiplier, 2.03);
        assert_eq!(price, Some(203.0));
    }

    #[test]
    fn test_quote_reports_fallback() {
        let args = quote_args(&[
            "--state", "São Paulo", "--city", "Campinas", "--channel", "frotista", "--category",
            "suv",
        ]);
        let (result, price) = price_quote(&args);
        assert!(result.is_fallback());
        assert_eq!(result.multiplier, 1.5);
        assert_eq!(price, None);
    }
}
