use crate::aggregate::{percent_of, ExpenseComponents};
use crate::model::{ExpenseCategory, ExpenseLine};

/// Split total expenses into the fixed category list, in display order.
pub fn expense_breakdown(components: &ExpenseComponents) -> Vec<ExpenseLine> {
    let total = components.total();
    ExpenseCategory::ALL
        .iter()
        .map(|&category| {
            let amount = match category {
                ExpenseCategory::Labor => components.labor,
                ExpenseCategory::RawMaterials => components.raw_materials,
                ExpenseCategory::Utilities => components.overhead.utilities,
                ExpenseCategory::EquipmentMaintenance => components.overhead.equipment_maintenance,
                ExpenseCategory::Miscellaneous => components.overhead.miscellaneous,
            };
            ExpenseLine { category, amount, percentage: percent_of(amount, total) }
        })
        .collect()
}
