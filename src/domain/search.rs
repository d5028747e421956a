use super::images::ImageHandle;
use super::query::{SaysQuery, parse_says};
use super::suggestion::{prediction, still_valid};

pub const NOT_FOUND_MESSAGE: &str = "Oops.. no cats were found :(";

/// Everything a front end needs to draw the search screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<ImageHandle>,
    pub suggestion: Option<String>,
}

/// What the result pane shows for a given state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    Idle,
    Loading,
    Error(&'a str),
    NotFound,
    Image(&'a ImageHandle),
}

impl SearchState {
    pub fn says(&self) -> Option<SaysQuery> {
        parse_says(&self.query)
    }

    /// Drop the held suggestion if it no longer extends the current input.
    pub fn validate_suggestion(&mut self) {
        if let Some(suggestion) = &self.suggestion
            && !still_valid(suggestion, &self.query)
        {
            self.suggestion = None;
        }
    }

    /// Full ghost text for the input field.
    pub fn prediction(&self) -> Option<String> {
        let suggestion = self.suggestion.as_deref()?;
        Some(prediction(suggestion, self.says().as_ref()))
    }

    pub fn view(&self) -> ResultView<'_> {
        if self.loading {
            return ResultView::Loading;
        }
        if let Some(error) = &self.error {
            return ResultView::Error(error);
        }
        match &self.result {
            Some(image) => ResultView::Image(image),
            None if self.query.is_empty() => ResultView::Idle,
            None => ResultView::NotFound,
        }
    }
}
