use tabled::{Table, Tabled, settings::Style};

use crate::record::Vehicle;

#[derive(Tabled)]
pub struct VehicleRow {
    #[tabled(rename = "Id")]
    pub id: i64,
    #[tabled(rename = "Plate")]
    pub plate: String,
    #[tabled(rename = "Owner")]
    pub owner: String,
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Photo")]
    pub photo: String,
}

impl From<&Vehicle> for VehicleRow {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: v.id,
            plate: v.plate.clone(),
            owner: v.owner.clone(),
            department: v.department.clone(),
            phone: v.phone.clone(),
            model: v.model.clone(),
            photo: v.photo.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Render a list of records as a terminal table
pub fn vehicle_table<'a, I>(vehicles: I) -> String
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let rows: Vec<VehicleRow> = vehicles.into_iter().map(VehicleRow::from).collect();
    if rows.is_empty() {
        return String::new();
    }

    Table::new(&rows).with(Style::rounded()).to_string()
}

/// Render label/value pairs as a terminal table
pub fn stats_table(stats: &[(&str, &str)]) -> String {
    #[derive(Tabled)]
    struct StatsRow {
        #[tabled(rename = "Metric")]
        metric: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows: Vec<StatsRow> = stats
        .iter()
        .map(|(label, value)| StatsRow {
            metric: label.to_string(),
            value: value.to_string(),
        })
        .collect();
    if rows.is_empty() {
        return String::new();
    }

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewVehicle;

    #[test]
    fn test_vehicle_table_renders_fields() {
        let vehicles =
            vec![NewVehicle::new("Kim", "Sales", "010-0000-0000", "12가3456", "Sonata")
                .into_vehicle(1)];
        let table = vehicle_table(&vehicles);
        assert!(table.contains("12가3456"));
        assert!(table.contains("Kim"));
        assert!(table.contains("Sonata"));
        // Missing photo renders as a dash
        assert!(table.contains('-'));
    }

    #[test]
    fn test_empty_lists_render_nothing() {
        let empty: Vec<Vehicle> = Vec::new();
        assert!(vehicle_table(&empty).is_empty());
        assert!(stats_table(&[]).is_empty());
    }
}
