use ferroute::repository::{Repository, Stop};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_station: Option<String>,
    /// Other platforms of the same station, reachable by a transfer.
    pub siblings: Vec<String>,
}

impl StopDto {
    pub fn from(stop: &Stop, repository: &Repository) -> Self {
        let siblings = match &stop.parent_station {
            Some(parent_station) => repository
                .stops_by_parent_station(parent_station)
                .into_iter()
                .filter(|sibling| sibling.index != stop.index)
                .map(|sibling| sibling.id.to_string())
                .collect(),
            None => Vec::new(),
        };
        Self {
            id: stop.id.to_string(),
            name: stop.display_name().to_string(),
            parent_station: stop.parent_station.as_deref().map(String::from),
            siblings,
        }
    }
}
