use carlosweeper_client::{GameClient, GameStateView, Pos, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create a client connecting to the server
    let client = GameClient::new("http://localhost:5000")?;

    // Fetch whatever game the server currently holds
    let state = client.fetch_state().await?;
    println!(
        "Current game: {}x{} with {} mines",
        state.grid_size, state.grid_size, state.mine_count
    );

    // Start over on the beginner board
    let state = client.set_difficulty("beginner").await?;
    print_state(&state);

    // Send a reveal
    let state = client.reveal_tile(Pos::new(0, 0)).await?;
    println!("Revealed (0, 0): {} tiles open", state.revealed.len());
    print_state(&state);

    // Send a flag
    let state = client.flag_tile(Pos::new(1, 1)).await?;
    println!("Flagged (1, 1): {:?}", state.flagged);

    // Reset the board
    let state = client.reset_game().await?;
    println!("Reset: {} tiles open", state.revealed.len());

    Ok(())
}

fn print_state(state: &GameStateView) {
    for (row, values) in state.board.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            print!("[{},{}:{}] ", row, col, value);
        }
        println!();
    }
    println!("Game over: {}, Won: {}", state.game_over, state.win);
}
