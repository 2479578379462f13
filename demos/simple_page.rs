//! End-to-end pixel lifecycle walkthrough
//!
//! Run with: cargo run --example simple_page [PIXEL_ID]
//!
//! Examples:
//!   cargo run --example simple_page            # no pixel id, custom-channel fallback
//!   cargo run --example simple_page 123456     # scoped dispatch to pixel 123456
//!
//! The demo stands in for a page lifetime: it boots the client, lets the
//! stub buffer the early calls, simulates the vendor script arriving, fires
//! the business events and prints what reached the vendor and the generic
//! event log.

use std::sync::Arc;

use pixel_rs::{
    ClientConfig, Page, PixelClient, ReadyOptions, RecordingHandle, ReservationEvent,
    VendorHandle,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pixel_rs=debug".parse()?)
                .add_directive("simple_page=debug".parse()?),
        )
        .init();

    let pixel_id = std::env::args().nth(1);

    let mut config = ClientConfig::default().debug(true);
    if let Some(id) = &pixel_id {
        config = config.pixel_id(id.clone());
    }

    let page = Arc::new(Page::new());
    let client = PixelClient::new(config, Arc::clone(&page));

    // Startup path: idempotent, a second call changes nothing
    client.ensure_ready(ReadyOptions::new()).await;
    client.ensure_ready(ReadyOptions::new()).await;

    println!("After bootstrap: {:?}", page.registry().snapshot().await);
    println!(
        "Script elements in document: {}",
        page.document().script_count().await
    );

    // An event fired before the script loads lands in the stub queue
    client
        .track_reservation_made(
            &ReservationEvent::new()
                .reservation_code("R-42")
                .full_name("  Jane Doe  ")
                .unit("Cabana 3")
                .status("confirmed"),
        )
        .await;

    // The vendor script "arrives": the real runtime takes over and drains
    // whatever the stub buffered
    let runtime = Arc::new(RecordingHandle::new());
    let buffered = page
        .vendor_script_loaded(Arc::clone(&runtime) as Arc<dyn VendorHandle>)
        .await;
    println!();
    println!("=== Calls buffered before script load ===");
    for call in &buffered {
        println!("  {:?}", call);
    }

    // Post-load traffic goes straight to the runtime
    client.track_page_view().await;
    client
        .track_reservation_checkin(&ReservationEvent::new().reservation_code("R-42"))
        .await;

    println!();
    println!("=== Calls delivered to the loaded runtime ===");
    for call in runtime.calls() {
        println!("  {:?}", call);
    }

    println!();
    println!("=== Generic event log ===");
    if let Some(log) = page.event_log().await {
        for entry in log.entries().await {
            println!("  {} {:?}", entry.event, entry.fields);
        }
    }

    Ok(())
}
