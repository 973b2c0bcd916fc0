use ferroute::repository::Repository;

/// Shared by every request. The repository is only read after startup.
pub struct AppState {
    pub repository: Repository,
}

impl AppState {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}
