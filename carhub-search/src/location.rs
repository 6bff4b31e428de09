use carhub_core::repository::LocationRepository;
use carhub_core::{CoreError, CoreResult};
use uuid::Uuid;

/// Resolves a pickup location to itself plus its direct children.
///
/// Grandchildren are not followed. A root that does not exist is an error;
/// a root with no cars anywhere below it is simply an empty search later on.
pub async fn expand_location(
    repo: &dyn LocationRepository,
    location_id: Uuid,
) -> CoreResult<Vec<Uuid>> {
    if !repo.exists(location_id).await? {
        return Err(CoreError::NotFound(format!("pickup location {}", location_id)));
    }

    let mut expanded = vec![location_id];
    for child in repo.children_of(location_id).await? {
        if !expanded.contains(&child) {
            expanded.push(child);
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carhub_core::Location;
    use carhub_store::memory::{MemoryStore, Snapshot};

    fn location(parent: Option<Uuid>) -> Location {
        Location { id: Uuid::new_v4(), name: String::new(), parent_location: parent }
    }

    #[tokio::test]
    async fn test_expands_one_level_only() {
        let city = location(None);
        let airport = location(Some(city.id));
        let downtown = location(Some(city.id));
        let terminal = location(Some(airport.id));
        let store = MemoryStore::new(Snapshot {
            locations: vec![city.clone(), airport.clone(), downtown.clone(), terminal.clone()],
            ..Default::default()
        });

        let expanded = expand_location(&store, city.id).await.unwrap();
        assert_eq!(expanded, vec![city.id, airport.id, downtown.id]);
        assert!(!expanded.contains(&terminal.id));
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_found() {
        let store = MemoryStore::new(Snapshot::default());
        let result = expand_location(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }
}
