use std::collections::HashMap;

/// Maps the spellings people paste ("kph", "celsius", "lbs") to one canonical unit id
#[derive(Debug, Clone, Default)]
pub struct UnitPreprocessor {
    aliases: HashMap<String, &'static str>,
}

impl UnitPreprocessor {
    pub fn new(table: &[(&'static str, &[&str])]) -> Self {
        let mut aliases = HashMap::new();
        for (canonical, spellings) in table {
            aliases.insert(canonical.to_string(), *canonical);
            for spelling in spellings.iter() {
                aliases.insert(spelling.to_lowercase(), *canonical);
            }
        }
        Self { aliases }
    }

    pub fn canonical(&self, unit_id: &str) -> Option<&'static str> {
        self.aliases.get(unit_id).copied()
    }

    /// Every accepted spelling, sorted
    pub fn unit_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.aliases.keys().cloned().collect();
        ids.sort();
        ids
    }
}
