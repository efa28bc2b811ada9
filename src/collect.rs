// src/collect.rs
//
// End-to-end pipelines over the source clients. The single-shot calls
// run on the caller's thread; `option_chains` fans symbols out over a
// small worker pool, one session per symbol.

use std::{
    thread,
    time::Duration,
    sync::{mpsc, atomic::{AtomicUsize, Ordering}},
};

use crate::{
    admissions::AdmissionsTable,
    config::consts::JITTER_MS,
    config::options::{ChainOptions, CollectOptions, FormOptions, Selection},
    core::net::Transport,
    error::{Result, SourceError},
    progress::Progress,
    schema::{TableSchemaNormalizer, TableSelector},
    specs::option_chain::{OptionChain, OptionChainClient},
    specs::orcr::FormSessionClient,
};

/// Fetch the cutoff form for `selection` and turn it into typed records.
/// Rows with missing ranks are kept; see `AdmissionsTable::with_complete_ranks`.
pub fn orcr<T: Transport>(
    transport: &T,
    options: &FormOptions,
    selection: &Selection,
    selector: &dyn TableSelector,
) -> Result<AdmissionsTable> {
    let raw = FormSessionClient::new(transport, options.clone()).fetch(selection)?;
    let tables = raw.tables();
    logd!("result page holds {} tables", tables.len());

    let grid = TableSchemaNormalizer::new(selector).normalize(&tables)?;
    let table = AdmissionsTable::from_grid(&grid);
    logf!("round {}: {} records", selection.round, table.len());
    Ok(table)
}

/// One option chain per symbol, in input order. A failed symbol does not
/// stop the batch. No retries.
pub fn option_chains<T: Transport>(
    transport: &T,
    options: &ChainOptions,
    symbols: &[String],
    collect: &CollectOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<(String, Result<OptionChain>)> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(symbols.len());
        p.log("Fetching option chains…");
    }

    let client = OptionChainClient::new(transport, options.clone());
    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<OptionChain>)>();
    let workers = collect.workers.min(symbols.len()).max(1);

    let mut slots: Vec<Option<Result<OptionChain>>> = symbols.iter().map(|_| None).collect();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (client, counter) = (&client, &counter);
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= symbols.len() {
                        break;
                    }
                    let result = client.fetch(&symbols[i]);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    if collect.pause_ms > 0 {
                        let jitter = (i as u64) % JITTER_MS;
                        thread::sleep(Duration::from_millis(collect.pause_ms + jitter)); // be polite
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx.iter() {
            if let Some(p) = progress.as_deref_mut() {
                match &result {
                    Ok(_) => p.item_done(i, &symbols[i]),
                    Err(e) => p.item_failed(i, &symbols[i], e),
                }
            }
            if let Err(e) = &result {
                loge!("{}: {e}", symbols[i]);
            }
            slots[i] = Some(result);
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    symbols
        .iter()
        .cloned()
        .zip(slots)
        .map(|(symbol, slot)| {
            let result = slot.unwrap_or_else(|| {
                Err(SourceError::SourceUnavailable(format!("{symbol}: worker stopped early")))
            });
            (symbol, result)
        })
        .collect()
}
