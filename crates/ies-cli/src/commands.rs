use std::fs;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use ies_cli::report::{candela_table, fields_table, keywords_table, summary_table};
use ies_interchange::{export_interchange, export_interchange_pretty, import_interchange};
use ies_lm63::read_ies;
use ies_model::{CandelaScale, IesDocument};

use crate::cli::{CandelaArgs, ExportArgs, ImportArgs, InspectArgs};

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let document = read_document(args)?;
    println!("{}", summary_table(&document));
    if document.keyword_count() > 0 {
        println!("{}", keywords_table(&document));
    }
    println!("{}", fields_table(&document));
    Ok(())
}

pub fn run_candela(args: &CandelaArgs) -> Result<()> {
    let _span = info_span!("candela", file = %args.file.display()).entered();
    let document = read_ies(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let table = candela_table(&document, candela_scale(args)).context("compute candela values")?;
    println!("{table}");
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let _span = info_span!("export", file = %args.file.display()).entered();
    let document = read_ies(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let text = if args.pretty {
        export_interchange_pretty(&document)
    } else {
        export_interchange(&document)
    }
    .context("encode interchange JSON")?;
    match &args.out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote interchange JSON");
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let _span = info_span!("import", file = %args.file.display()).entered();
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let document = import_interchange(&text)
        .with_context(|| format!("decode {}", args.file.display()))?;
    println!("{}", summary_table(&document));
    Ok(())
}

fn read_document(args: &InspectArgs) -> Result<IesDocument> {
    let _span = info_span!("inspect", file = %args.file.display()).entered();
    let document = read_ies(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    info!(
        keywords = document.keyword_count(),
        fields = document.field_count(),
        candela_values = document.candela_count(),
        "parsed LM-63 file"
    );
    Ok(document)
}

/// The scale to apply, or `None` to print raw samples.
fn candela_scale(args: &CandelaArgs) -> Option<CandelaScale> {
    if !args.computed && args.multiplier.is_none() && args.ballast_factor.is_none() {
        return None;
    }
    let mut scale = CandelaScale::new();
    if let Some(multiplier) = args.multiplier {
        scale = scale.with_candela_multiplier(multiplier);
    }
    if let Some(ballast_factor) = args.ballast_factor {
        scale = scale.with_ballast_factor(ballast_factor);
    }
    Some(scale)
}
