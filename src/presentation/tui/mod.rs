pub mod app;
pub mod ui;

use anyhow::Result;

use crate::application::coordinator::SearchCoordinator;
use app::App;

/// Take over the terminal until the user quits.
pub async fn run(search: SearchCoordinator, initial_query: Option<String>) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = App::new(search, initial_query);
    let result = app.run(&mut terminal).await;
    ratatui::restore();
    result
}
