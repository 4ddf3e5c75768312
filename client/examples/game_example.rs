use carlosweeper_client::{
    ClientConfig, GameSession, GameStateView, InfoPanel, Pos, SessionEvent, StatusBanner,
    TileVisual, render,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let session = GameSession::connect(&ClientConfig::from_env())?;

    // Subscribe to session events for background listening
    let mut event_receiver = session.subscribe_to_events().await;

    let event_handler = tokio::spawn(async move {
        while let Some(event) = event_receiver.recv().await {
            match event {
                SessionEvent::StateReplaced { kind, resized } => {
                    println!("📋 State replaced by {} (resized: {})", kind.as_str(), resized);
                }
                SessionEvent::RequestFailed { kind } => {
                    println!("🔌 {} request failed", kind.as_str());
                }
            }
        }
    });

    session.load().await?;
    session.set_difficulty("beginner").await?;
    display_board(&session.state().await);

    println!("\n=== Making some moves ===");

    println!("Revealing tile (0, 0)...");
    session.reveal(Pos::new(0, 0)).await?;
    display_board(&session.state().await);

    println!("\nFlagging tile (1, 1)...");
    session.flag(Pos::new(1, 1)).await?;
    display_board(&session.state().await);

    // Flag the same tile again (the server toggles it off)
    println!("\nUnflagging tile (1, 1)...");
    session.flag(Pos::new(1, 1)).await?;
    display_board(&session.state().await);

    event_handler.abort();
    let _ = event_handler.await;

    Ok(())
}

fn display_board(state: &GameStateView) {
    let grid = render(state);
    for (row, tiles) in grid.rows().enumerate() {
        print!("  ");
        for tile in tiles {
            let symbol = match tile.visual {
                TileVisual::Hidden => "·".to_string(),
                TileVisual::Empty => " ".to_string(),
                other => other.glyph(),
            };
            print!("{:2}", symbol);
        }
        println!("  {}", row);
    }

    let info = InfoPanel::from_state(state);
    println!(
        "Revealed: {}  Mines: {}  {}",
        info.revealed_count,
        info.mine_count,
        StatusBanner::from_state(state).message()
    );
}
