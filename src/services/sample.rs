use crate::models::{CellValue, Dataset, Record};

const SAMPLE_ROWS: [(&str, i64, i64, i64); 12] = [
    ("Jan", 100, 20, 5),
    ("Feb", 120, 25, 7),
    ("Mar", 150, 30, 10),
    ("Apr", 80, 10, 4),
    ("May", 200, 45, 15),
    ("Jun", 220, 50, 17),
    ("Jul", 180, 40, 12),
    ("Aug", 250, 60, 20),
    ("Sep", 300, 70, 25),
    ("Oct", 280, 65, 22),
    ("Nov", 350, 90, 30),
    ("Dec", 400, 100, 35),
];

/// Monthly sales figures shown until the user uploads their own data.
pub fn sample_dataset() -> Dataset {
    Dataset::new(
        SAMPLE_ROWS
            .iter()
            .map(|&(month, sales, profit, customers)| {
                Record::from([
                    ("month".to_string(), CellValue::from(month)),
                    ("sales".to_string(), CellValue::from(sales)),
                    ("profit".to_string(), CellValue::from(profit)),
                    ("customers".to_string(), CellValue::from(customers)),
                ])
            })
            .collect(),
    )
}
