//! Schema DDL
//!
//! Table definitions generated from the entity catalogue, plus the drop and
//! recreate scripts used by the admin reset endpoints and database tests.

use crate::entity::{quote_ident, Entity};

/// A foreign key from `columns` to `parent`'s `parent_columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub columns: &'static [&'static str],
    pub parent: Entity,
    pub parent_columns: &'static [&'static str],
}

impl ForeignKey {
    const fn new(
        columns: &'static [&'static str],
        parent: Entity,
        parent_columns: &'static [&'static str],
    ) -> Self {
        Self {
            columns,
            parent,
            parent_columns,
        }
    }
}

const CREDIT_CARD: &[&str] = &["creditCardNumber"];
const ITEM_ID: &[&str] = &["itemID"];

/// Foreign keys declared by `entity`. All of them cascade on delete.
pub fn foreign_keys(entity: Entity) -> &'static [ForeignKey] {
    const ITEM: &[ForeignKey] = &[ForeignKey::new(CREDIT_CARD, Entity::Customer, CREDIT_CARD)];
    const LISTED_ITEM: &[ForeignKey] = &[
        ForeignKey::new(
            &["listed_date", "time", "address"],
            Entity::AuctionSession,
            &["event_date", "time", "address"],
        ),
        ForeignKey::new(CREDIT_CARD, Entity::Customer, CREDIT_CARD),
    ];
    const AUCTION_SESSION: &[ForeignKey] = &[ForeignKey::new(
        &["employeeID"],
        Entity::Auctioneer,
        &["employeeID"],
    )];
    const APPRAISAL: &[ForeignKey] = &[
        ForeignKey::new(&["appraiserID"], Entity::Appraiser, &["appraiserID"]),
        ForeignKey::new(ITEM_ID, Entity::Item, ITEM_ID),
    ];
    const BID: &[ForeignKey] = &[
        ForeignKey::new(ITEM_ID, Entity::ListedItem, ITEM_ID),
        ForeignKey::new(CREDIT_CARD, Entity::Customer, CREDIT_CARD),
    ];
    const COLLECTION: &[ForeignKey] = &[
        ForeignKey::new(&["licensePlate"], Entity::DeliveryVehicle, &["licensePlate"]),
        ForeignKey::new(&["address"], Entity::StorageFacility, &["address"]),
    ];

    match entity {
        Entity::Item => ITEM,
        Entity::ListedItem => LISTED_ITEM,
        Entity::AuctionSession => AUCTION_SESSION,
        Entity::Appraisal => APPRAISAL,
        Entity::Bid => BID,
        Entity::Collection => COLLECTION,
        Entity::Customer
        | Entity::Auctioneer
        | Entity::Appraiser
        | Entity::DeliveryVehicle
        | Entity::StorageFacility => &[],
    }
}

fn ident_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| quote_ident(n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `CREATE TABLE` statement for one entity.
pub fn create_table(entity: Entity) -> String {
    let mut lines: Vec<String> = entity
        .columns()
        .iter()
        .map(|c| {
            let not_null = if c.nullable { "" } else { " NOT NULL" };
            format!("    {} {}{}", c.ident(), c.ty.sql_name(), not_null)
        })
        .collect();

    lines.push(format!("    PRIMARY KEY ({})", ident_list(entity.key())));
    for fk in foreign_keys(entity) {
        lines.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE CASCADE",
            ident_list(fk.columns),
            fk.parent.table_ident(),
            ident_list(fk.parent_columns)
        ));
    }

    format!(
        "CREATE TABLE {} (\n{}\n)",
        entity.table_ident(),
        lines.join(",\n")
    )
}

/// `DROP TABLE` statement for one entity; dependent constraints go with it.
pub fn drop_table(entity: Entity) -> String {
    format!("DROP TABLE IF EXISTS {} CASCADE", entity.table_ident())
}

/// Drop and recreate one table.
///
/// Parent tables referenced by the entity must already exist.
pub fn reset_script(entity: Entity) -> String {
    format!("{};\n{};\n", drop_table(entity), create_table(entity))
}

/// Drop every table, then create them all parents first.
pub fn create_all_script() -> String {
    let mut script = String::new();
    for entity in Entity::ALL.iter().rev() {
        script.push_str(&drop_table(*entity));
        script.push_str(";\n");
    }
    for entity in Entity::ALL {
        script.push_str(&create_table(entity));
        script.push_str(";\n");
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_table_ddl() {
        let ddl = create_table(Entity::Item);
        assert!(ddl.starts_with("CREATE TABLE \"Items_Sells\" ("));
        assert!(ddl.contains("\"itemID\" INTEGER NOT NULL"));
        assert!(ddl.contains("\"category\" VARCHAR(255),"));
        assert!(ddl.contains("PRIMARY KEY (\"itemID\")"));
        assert!(ddl.contains(
            "FOREIGN KEY (\"creditCardNumber\") REFERENCES \"Customers\" (\"creditCardNumber\") ON DELETE CASCADE"
        ));
    }

    #[test]
    fn test_composite_foreign_key() {
        let ddl = create_table(Entity::ListedItem);
        assert!(ddl.contains(
            "FOREIGN KEY (\"listed_date\", \"time\", \"address\") REFERENCES \"AuctionSession_Operates\" (\"event_date\", \"time\", \"address\")"
        ));
    }

    #[test]
    fn test_parents_created_before_children() {
        let position = |e: Entity| Entity::ALL.iter().position(|x| *x == e);
        for entity in Entity::ALL {
            for fk in foreign_keys(entity) {
                assert!(
                    position(fk.parent) < position(entity),
                    "{} is created before its parent {}",
                    entity,
                    fk.parent
                );
            }
        }
    }

    #[test]
    fn test_foreign_keys_point_at_parent_keys() {
        for entity in Entity::ALL {
            for fk in foreign_keys(entity) {
                assert_eq!(fk.columns.len(), fk.parent_columns.len());
                for column in fk.columns {
                    assert!(entity.column(column).is_some());
                }
                assert_eq!(fk.parent.key(), fk.parent_columns);
            }
        }
    }

    #[test]
    fn test_reset_script_drops_then_creates() {
        let script = reset_script(Entity::ListedItem);
        let drop = script.find("DROP TABLE IF EXISTS \"ForSaleItems_ListedAt_Wins\" CASCADE");
        let create = script.find("CREATE TABLE \"ForSaleItems_ListedAt_Wins\"");
        assert!(drop.is_some());
        assert!(drop < create);
    }

    #[test]
    fn test_full_script_drops_every_table_before_creating() {
        let script = create_all_script();
        let first_create = script.find("CREATE TABLE");
        for entity in Entity::ALL {
            let drop = drop_table(entity);
            assert_eq!(script.matches(drop.as_str()).count(), 1, "{} dropped once", entity);
            assert!(script.find(drop.as_str()) < first_create);
        }
    }
}
