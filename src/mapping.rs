use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct DBLocationMapping {
    pub id: i32,
    pub city_id: i32,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the client receives when they request the mapping table.
pub type ServerLocationMapping = DBLocationMapping;

/// What the client sends when they save mappings: region name to the
/// ids of the cities grouped under it. An empty map clears everything.
#[derive(Deserialize, Debug)]
pub struct MappingSave {
    pub mappings: HashMap<String, Vec<i32>>,
}

/// One (city, region) pair of the flattened save body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub city_id: i32,
    pub region: String,
}

impl MappingSave {
    /// Flatten the region -> city-ids map into insertable rows, sorted
    /// by region then city id so the insert order is deterministic.
    pub fn rows(&self) -> Vec<MappingRow> {
        let mut rows: Vec<MappingRow> = self
            .mappings
            .iter()
            .flat_map(|(region, city_ids)| {
                city_ids.iter().map(move |&city_id| MappingRow {
                    city_id,
                    region: region.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.region.cmp(&b.region).then(a.city_id.cmp(&b.city_id)));
        rows
    }
}

#[test]
fn empty_save_has_no_rows() {
    let save = MappingSave {
        mappings: HashMap::new(),
    };
    assert_eq!(save.rows(), Vec::new());
}

#[test]
fn rows_are_flattened_and_sorted() {
    let mut mappings = HashMap::new();
    mappings.insert("Obalno-kraška".to_string(), vec![7, 3]);
    mappings.insert("Gorenjska".to_string(), vec![1]);
    let save = MappingSave { mappings };

    let rows = save.rows();
    assert_eq!(
        rows,
        vec![
            MappingRow {
                city_id: 1,
                region: "Gorenjska".into()
            },
            MappingRow {
                city_id: 3,
                region: "Obalno-kraška".into()
            },
            MappingRow {
                city_id: 7,
                region: "Obalno-kraška".into()
            },
        ]
    );
}

#[test]
fn region_with_no_cities_yields_no_rows() {
    let mut mappings = HashMap::new();
    mappings.insert("Gorenjska".to_string(), Vec::new());
    let save = MappingSave { mappings };
    assert_eq!(save.rows(), Vec::new());
}
