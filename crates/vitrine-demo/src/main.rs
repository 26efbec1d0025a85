#![forbid(unsafe_code)]

//! Vitrine demo binary.
//!
//! Drives the viewer engine through a scripted session over a sample
//! catalog (or one loaded from a JSON file passed as the first argument)
//! and prints each transition plus the final engagement summary. Set
//! `RUST_LOG=debug` to watch the engine's own tracing output alongside.

use std::process::ExitCode;

use tracing::info;
use vitrine::prelude::*;
use vitrine::{EngagementSummary, MemorySink};

const SAMPLE_CATALOG: &str = r#"{
    "groups": [
        {
            "key": "praia",
            "displayName": "Pacotes de Praia",
            "items": [
                {"id": "porto", "displayName": "Porto de Galinhas",
                 "media": [{"url": "https://cdn.example/porto-1.jpg"},
                           {"url": "https://cdn.example/porto-tour.mp4", "kind": "video"}]},
                {"id": "maragogi", "displayName": "Maragogi",
                 "media": [{"url": "https://cdn.example/maragogi-1.jpg"}]},
                {"id": "jeri", "displayName": "Jericoacoara",
                 "media": [{"url": "https://cdn.example/jeri-1.jpg"}]}
            ]
        },
        {
            "key": "serra",
            "displayName": "Pacotes de Serra",
            "items": [
                {"id": "gramado", "displayName": "Gramado",
                 "media": [{"url": "https://cdn.example/gramado-1.jpg"}]}
            ]
        }
    ]
}"#;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let catalog = match load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("failed to load catalog: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        groups = catalog.group_count(),
        items = catalog.item_count(),
        "catalog loaded"
    );

    // A visitor arrives through a shared deep link.
    let history = MemoryHistory::with_initial(Query::parse("?grupo=praia&item=maragogi"));
    let sink = MemorySink::new();
    let mut viewer = ViewerController::new(catalog, history)
        .with_policy(BoundaryPolicy::Clamp)
        .with_telemetry(Telemetry::spawn(Box::new(sink.clone())));

    viewer.subscribe(Box::new(|event: &ViewerEvent| match event {
        ViewerEvent::Opened {
            group_key,
            item_index,
        } => println!("modal opened: {group_key}[{item_index}]"),
        ViewerEvent::SelectionMoved { item_index } => {
            println!("selection moved: [{item_index}]");
        }
        ViewerEvent::Closed => println!("modal closed"),
    }));

    viewer.bootstrap();
    print_state(&viewer);

    // Flip through the gallery with the keyboard.
    viewer.handle_key(KeyEvent::new(KeyCode::Right));
    viewer.handle_key(KeyEvent::new(KeyCode::Right));
    viewer.handle_key(KeyEvent::new(KeyCode::Left));
    print_state(&viewer);

    // Engage, then close with Escape.
    if let Some((_, item)) = viewer.current() {
        let item_id = item.id.clone();
        viewer.like(&item_id);
        viewer.like(&item_id);
        viewer.share(&item_id);
    }
    viewer.handle_key(KeyEvent::new(KeyCode::Escape));
    println!("url after close: \"?{}\"", viewer.current_query());

    // A second visit through an explicit click.
    viewer.open("serra", "gramado");
    print_state(&viewer);
    viewer.close();

    let summary = EngagementSummary::collect(viewer.catalog(), viewer.counts(), 3);
    println!();
    println!(
        "totals: {} views, {} likes, {} shares",
        summary.totals.views, summary.totals.likes, summary.totals.shares
    );
    for group in &summary.groups {
        println!(
            "  {:<20} {} views, {} likes",
            group.display_name, group.counts.views, group.counts.likes
        );
    }
    for top in &summary.top_items {
        println!("  top: {}/{} ({} views)", top.group_key, top.item_id, top.views);
    }

    drop(viewer);
    println!("counters delivered: {}", sink.delivered().len());
    ExitCode::SUCCESS
}

fn load_catalog() -> Result<Catalog, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path)?;
            Ok(Catalog::from_json_slice(&bytes)?)
        }
        None => Ok(Catalog::from_json_str(SAMPLE_CATALOG)?),
    }
}

fn print_state(viewer: &ViewerController<MemoryHistory>) {
    match viewer.state() {
        ModalState::Open { .. } => {
            if let Some((group, item)) = viewer.current() {
                println!(
                    "showing \"{}\" from \"{}\" ({} media), url \"?{}\"",
                    item.display_name,
                    group.display_name,
                    item.media.len(),
                    viewer.current_query()
                );
            }
        }
        ModalState::Closed => println!("nothing open, url \"?{}\"", viewer.current_query()),
    }
}
