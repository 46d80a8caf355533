use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use fieldmap_cli::script::replay;
use fieldmap_client::{ClientConfig, MergeClient};
use fieldmap_ingest::load_file;
use fieldmap_model::{Side, compare_fields};
use fieldmap_session::{SessionError, SessionState, matching_fields};

use crate::cli::{CompareArgs, InspectArgs, MapArgs, MergeArgs, SessionArgs};
use crate::types::{CompareReport, InspectReport, MapReport, MergeReport};

pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let mut schema = load_file(&args.file)
        .and_then(|ingested| ingested.into_side(Side::New))
        .with_context(|| format!("read {}", args.file.display()))?;
    if let Some(table) = &args.table {
        schema.select_table(table)?;
    }
    Ok(InspectReport {
        path: args.file.clone(),
        schema,
        rows: args.rows,
    })
}

pub fn run_compare(args: &CompareArgs) -> Result<CompareReport> {
    let existing = load_file(&args.existing)
        .and_then(|ingested| ingested.into_side(Side::Existing))
        .with_context(|| format!("read {}", args.existing.display()))?;
    let new = load_file(&args.new)
        .and_then(|ingested| ingested.into_side(Side::New))
        .with_context(|| format!("read {}", args.new.display()))?;
    let comparison = compare_fields(existing.fields(), new.fields());
    info!(
        only_existing = comparison.only_existing.len(),
        only_new = comparison.only_new.len(),
        shared = comparison.shared.len(),
        "compared schemas"
    );
    Ok(CompareReport {
        existing,
        new,
        comparison,
    })
}

pub fn run_map(args: &MapArgs, config: &ClientConfig) -> Result<MapReport> {
    let span = info_span!("map");
    let _guard = span.enter();

    let client = if args.session.existing_from_server {
        Some(connect(config)?)
    } else {
        None
    };
    let mut session = SessionState::new();
    load_sides(&mut session, &args.session, client.as_ref(), false)?;
    let steps = replay(&mut session, &args.session.clicks)?;

    let export_path = config.export_file.clone();
    let document = session.write_export(&export_path).map_err(session_error)?;
    Ok(MapReport {
        steps,
        export_path,
        document,
    })
}

pub fn run_merge(args: &MergeArgs, config: &ClientConfig) -> Result<MergeReport> {
    let span = info_span!("merge");
    let _guard = span.enter();

    let client = connect(config)?;
    let mut session = SessionState::new();
    load_sides(&mut session, &args.session, Some(&client), args.upload)?;
    let steps = replay(&mut session, &args.session.clicks)?;
    if session.mappings().is_empty() {
        warn!("submitting merge without any field mappings");
    }

    let mappings = session.mappings().to_vec();
    let matching = matching_fields(session.fields(Side::Existing), &mappings);
    let records = session
        .side(Side::New)
        .map_or(0, |schema| schema.records().len());
    let message = session.process_merge(&client).map_err(session_error)?;
    Ok(MergeReport {
        steps,
        mappings,
        matching_fields: matching,
        records,
        message,
    })
}

fn connect(config: &ClientConfig) -> Result<MergeClient> {
    let client = MergeClient::new(config).context("configure merge service client")?;
    info!(url = client.base_url(), "using merge service");
    Ok(client)
}

/// Loads both sides into `session` and applies the requested table choices.
fn load_sides(
    session: &mut SessionState,
    args: &SessionArgs,
    client: Option<&MergeClient>,
    upload_new: bool,
) -> Result<()> {
    if args.existing_from_server {
        let client = client.context("fetching the existing schema needs the merge service")?;
        session
            .fetch_existing_schema(client)
            .map_err(session_error)?;
    } else {
        let path = args
            .existing
            .as_deref()
            .context("either --existing or --existing-from-server is required")?;
        load_local(session, Side::Existing, path)?;
    }

    if upload_new {
        let client = client.context("uploading needs the merge service")?;
        session
            .upload_new(client, &args.new)
            .map_err(session_error)?;
    } else {
        load_local(session, Side::New, &args.new)?;
    }

    for (side, table) in [
        (Side::Existing, &args.existing_table),
        (Side::New, &args.new_table),
    ] {
        if let Some(table) = table {
            session.select_table(side, table).map_err(session_error)?;
        }
    }
    Ok(())
}

fn load_local(session: &mut SessionState, side: Side, path: &Path) -> Result<()> {
    let ingested = load_file(path).with_context(|| format!("read {}", path.display()))?;
    session
        .load_ingested(side, ingested)
        .map_err(session_error)
        .with_context(|| format!("load {}", path.display()))
}

/// Wraps a session error with its banner text.
fn session_error(err: SessionError) -> anyhow::Error {
    let banner = err.user_message().to_string();
    anyhow::Error::new(err).context(banner)
}
