/// Coarse screen the application is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Entering a subject and difficulty.
    #[default]
    Setup,
    /// Waiting for the question provider.
    Loading,
    /// Answering questions.
    Quiz,
    /// Final score.
    Results,
}
