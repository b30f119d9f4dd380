//! Seed data for the in-memory collaborators: a representative slice of
//! the refrigerator and dishwasher catalog, the documentation set, and a
//! handful of orders in different states.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::docs::{Doc, DocType};
use crate::orders::{Order, OrderItem, ShippingAddress};
use crate::parts::{ApplianceType, Part};

struct PartSeed {
    part_number: &'static str,
    name: &'static str,
    price_cents: i64,
    stock: &'static str,
    appliance_type: ApplianceType,
    compatible_models: &'static [&'static str],
    description: &'static str,
}

const PART_SEEDS: &[PartSeed] = &[
    PartSeed {
        part_number: "W10295370A",
        name: "Refrigerator Water Filter",
        price_cents: 49_99,
        stock: "In Stock",
        appliance_type: ApplianceType::Refrigerator,
        compatible_models: &["WRF535SWHZ", "WRS325SDHZ", "WRX735SDHZ", "WRF555SDFZ"],
        description: "Replacement water filter for the dispenser and ice maker. Replace every six months to avoid strange-tasting water and slow dispensing.",
    },
    PartSeed {
        part_number: "W10190961",
        name: "Refrigerator Ice Maker Assembly",
        price_cents: 239_50,
        stock: "In Stock",
        appliance_type: ApplianceType::Refrigerator,
        compatible_models: &["WRS321SDHZ", "WRS325SDHZ", "WRF535SWHZ"],
        description: "Complete ice maker assembly. If the refrigerator is not making ice or produces hollow cubes, the assembly may need replacement.",
    },
    PartSeed {
        part_number: "WPW10503278",
        name: "Dishwasher Control Board",
        price_cents: 129_99,
        stock: "In Stock",
        appliance_type: ApplianceType::Dishwasher,
        compatible_models: &["WDT780SAEM1", "WDF540PADM", "WDT750SAHZ"],
        description: "Main electronic control board. A dishwasher that will not start or stops mid-cycle often has a failed control board.",
    },
    PartSeed {
        part_number: "WPW10518394",
        name: "Dishwasher Heating Element",
        price_cents: 64_75,
        stock: "In Stock",
        appliance_type: ApplianceType::Dishwasher,
        compatible_models: &["WDT780SAEM1", "WDF540PADM", "MDB8959SFZ"],
        description: "Heating element for the dry cycle. Dishes coming out wet or cold usually point at this element.",
    },
    PartSeed {
        part_number: "W10348269",
        name: "Dishwasher Drain Pump",
        price_cents: 86_49,
        stock: "In Stock",
        appliance_type: ApplianceType::Dishwasher,
        compatible_models: &["WDT780SAEM1", "MDB8959SFZ", "GDF520PGJWW"],
        description: "Drain pump and motor. Standing water after a cycle means the pump or the drain hose is blocked or the pump has failed.",
    },
    PartSeed {
        part_number: "WPW10438677",
        name: "Refrigerator Door Gasket",
        price_cents: 74_25,
        stock: "Out of Stock",
        appliance_type: ApplianceType::Refrigerator,
        compatible_models: &["WRF535SWHZ", "WRB322DMBM", "WRS321SDHZ"],
        description: "Magnetic door gasket (seal). A torn or loose gasket lets warm air in, causing frost build-up and poor cooling.",
    },
    PartSeed {
        part_number: "67003753",
        name: "Refrigerator Crisper Drawer",
        price_cents: 58_35,
        stock: "In Stock",
        appliance_type: ApplianceType::Refrigerator,
        compatible_models: &["GD5SHAAXNQ00", "GD5SHAXNS00", "ED5FHAXVB01"],
        description: "Clear crisper drawer for the fresh food compartment. Replaces cracked or missing drawers.",
    },
    PartSeed {
        part_number: "PS11746337",
        name: "Refrigerator Water Inlet Valve",
        price_cents: 89_99,
        stock: "In Stock",
        appliance_type: ApplianceType::Refrigerator,
        compatible_models: &["WRS325SDHZ", "WRF555SDFZ", "WRX735SDHZ"],
        description: "The water inlet valve feeds the ice maker and water dispenser. A failed valve causes leaking, no water flow, or low pressure.",
    },
    PartSeed {
        part_number: "PS11705149",
        name: "Temperature Control Thermostat",
        price_cents: 142_75,
        stock: "In Stock",
        appliance_type: ApplianceType::Refrigerator,
        compatible_models: &["WRF535SWHZ", "WRB322DMBM", "WRS321SDHZ"],
        description: "Regulates compartment temperature. A refrigerator running too warm or too cold may need a new thermostat.",
    },
    PartSeed {
        part_number: "PS11784756",
        name: "Refrigerator Evaporator Fan Motor",
        price_cents: 105_49,
        stock: "In Stock",
        appliance_type: ApplianceType::Refrigerator,
        compatible_models: &["WRS325SDHZ", "WRF535SWHZ", "WRX735SDHZ"],
        description: "Circulates air across the evaporator coils. A refrigerator making noise or not cooling evenly often has a worn fan motor.",
    },
    PartSeed {
        part_number: "PS11750093",
        name: "Dishwasher Door Latch",
        price_cents: 42_80,
        stock: "In Stock",
        appliance_type: ApplianceType::Dishwasher,
        compatible_models: &["WDT780SAEM1", "WDF540PADM", "GDF520PGJWW"],
        description: "Door latch and switch assembly. The dishwasher will not run when the latch no longer engages.",
    },
    PartSeed {
        part_number: "PS11756150",
        name: "Dishwasher Lower Rack Assembly",
        price_cents: 118_60,
        stock: "In Stock",
        appliance_type: ApplianceType::Dishwasher,
        compatible_models: &["WDT780SAEM1", "MDB8959SFZ", "WDT750SAHZ"],
        description: "Lower dish rack with rollers. Replaces racks with broken tines or seized rollers.",
    },
];

pub fn seed_parts() -> Vec<Part> {
    PART_SEEDS
        .iter()
        .map(|seed| Part {
            part_number: seed.part_number.to_string(),
            name: seed.name.to_string(),
            price: Decimal::new(seed.price_cents, 2),
            stock: seed.stock.to_string(),
            appliance_type: seed.appliance_type,
            compatible_models: seed
                .compatible_models
                .iter()
                .map(|model| model.to_string())
                .collect(),
            description: seed.description.to_string(),
        })
        .collect()
}

struct DocSeed {
    title: &'static str,
    doc_type: DocType,
    appliance_type: Option<ApplianceType>,
    content: &'static str,
}

const DOC_SEEDS: &[DocSeed] = &[
    DocSeed {
        title: "How to Replace a Refrigerator Water Filter",
        doc_type: DocType::Installation,
        appliance_type: Some(ApplianceType::Refrigerator),
        content: "Most Whirlpool-style filters sit in the upper right corner of the fresh food compartment.\n\n## Step-by-Step Instructions\n1. Locate the filter compartment in the upper right corner\n2. Push the release button or rotate the old filter a quarter turn counterclockwise\n3. Pull the old filter straight out and discard it\n4. Remove the protective caps from the new filter\n5. Insert the new filter and rotate it clockwise until it locks\n6. Run two gallons of water through the dispenser to flush the carbon\n\n## Notes\nReset the filter indicator light after replacement.",
    },
    DocSeed {
        title: "How to Replace a Refrigerator Ice Maker",
        doc_type: DocType::Installation,
        appliance_type: Some(ApplianceType::Refrigerator),
        content: "Applies to modular ice maker assemblies.\n\n## Step-by-Step Instructions\n1. Unplug the refrigerator and turn off the water supply\n2. Remove the ice bin and the freezer shelf\n3. Remove the mounting screws holding the ice maker to the freezer wall\n4. Unplug the wiring harness from the ice maker\n5. Connect the harness to the new ice maker and mount it\n6. Restore water and power, then wait 24 hours for the first harvest",
    },
    DocSeed {
        title: "How to Replace a Refrigerator Door Gasket",
        doc_type: DocType::Installation,
        appliance_type: Some(ApplianceType::Refrigerator),
        content: "A leaky door gasket causes frost build-up and makes the compressor run constantly.\n\n## Step-by-Step Instructions\n1. Soak the new gasket in warm water to make it pliable\n2. Starting at a top corner, pull the old gasket out of its retainer channel\n3. Press the new gasket into the channel, corners first\n4. Work around the door, seating the gasket evenly\n5. Close the door and check for gaps with a dollar bill",
    },
    DocSeed {
        title: "Dishwasher Heating Element Installation Guide",
        doc_type: DocType::Installation,
        appliance_type: Some(ApplianceType::Dishwasher),
        content: "The heating element is the exposed loop at the bottom of the tub.\n\n## Step-by-Step Instructions\n1. Turn off power to the dishwasher at the breaker\n2. Remove the lower rack and the spray arm\n3. Disconnect the element terminals from under the tub\n4. Unscrew the mounting nuts and lift the old element out\n5. Seat the new element and reconnect the terminals\n6. Restore power and run a dry cycle to verify heat",
    },
    DocSeed {
        title: "How to Replace a Dishwasher Drain Pump",
        doc_type: DocType::Installation,
        appliance_type: Some(ApplianceType::Dishwasher),
        content: "Standing water in the tub usually means the drain pump or drain hose is blocked.\n\n## Step-by-Step Instructions\n1. Turn off power and water to the dishwasher\n2. Pull the unit out and tip it back to access the sump\n3. Disconnect the drain hose and the pump wiring\n4. Twist the pump off the sump housing\n5. Seat the new pump and reconnect hose and wiring\n6. Run a rinse cycle and check for leaks",
    },
    DocSeed {
        title: "Dishwasher Control Board Replacement Guide",
        doc_type: DocType::Installation,
        appliance_type: Some(ApplianceType::Dishwasher),
        content: "The control board lives inside the door behind the control panel.\n\n## Step-by-Step Instructions\n1. Turn off power to the dishwasher at the breaker\n2. Open the door and remove the inner door panel screws\n3. Photograph the wiring before disconnecting anything\n4. Release the wiring connectors and remove the old board\n5. Mount the new control board and reconnect each connector\n6. Reassemble the door and restore power",
    },
    DocSeed {
        title: "Refrigerator Not Cooling Troubleshooting",
        doc_type: DocType::Troubleshooting,
        appliance_type: Some(ApplianceType::Refrigerator),
        content: "A refrigerator not cooling or making noise usually comes down to airflow or a failed component. Check the condenser coils for dust first. If the compartment is warm and the fan is silent, the evaporator fan motor has likely seized. An erratic temperature control thermostat causes both warm food and freezer frost. A compressor that clicks but never runs needs professional service. A torn door gasket also lets warm air in and mimics a cooling failure, and a unit that is not working at all may simply have a tripped breaker.",
    },
    DocSeed {
        title: "Refrigerator Ice Maker Troubleshooting",
        doc_type: DocType::Troubleshooting,
        appliance_type: Some(ApplianceType::Refrigerator),
        content: "No ice or hollow cubes point at the water path. A clogged water filter starves the ice maker and gives dispensed water a strange taste. Check the water inlet valve for scale; a stuck valve also floods the water dispenser. If the mold never cycles, the ice maker assembly itself has failed. Slow production with no water at the dispenser means the line is frozen or kinked.",
    },
    DocSeed {
        title: "Dishwasher Not Draining Troubleshooting Guide",
        doc_type: DocType::Troubleshooting,
        appliance_type: Some(ApplianceType::Dishwasher),
        content: "Standing water after a cycle means the drain path is blocked. Clear the filter basket, then check the drain hose for kinks where it loops to the sink. A humming unit that will not empty has a jammed or failed drain pump. A stuck float switch can also stop the cycle early with water still in the tub.",
    },
    DocSeed {
        title: "Dishwasher Leaking Troubleshooting",
        doc_type: DocType::Troubleshooting,
        appliance_type: Some(ApplianceType::Dishwasher),
        content: "Leaking from the door front means the door gasket is torn or the door latch no longer pulls the door tight. Water under the unit points at the drain pump seal or a split drain hose. A cracked spray arm sprays water at the door vents; inspect it for hairline cracks. Overfilling from a stuck float switch also ends up on the floor.",
    },
    DocSeed {
        title: "Safety Guidelines for Appliance Repair",
        doc_type: DocType::Safety,
        appliance_type: None,
        content: "Read this before opening any appliance.\n\n### Disconnect power before any repair\nUnplug the appliance or switch off the breaker; verify with a tester.\n\n### Shut off the water supply\nClose the valve before disconnecting any water line.\n\n### Wear cut-resistant gloves\nSheet-metal edges inside appliances are sharp.\n\n### Never bypass door switches or interlocks\nThey exist to keep the machine from running while open.\n\n### When in doubt, stop\nSealed-system and gas repairs belong to licensed technicians.",
    },
];

pub fn seed_docs() -> Vec<Doc> {
    DOC_SEEDS
        .iter()
        .map(|seed| Doc {
            title: seed.title.to_string(),
            doc_type: seed.doc_type,
            appliance_type: seed.appliance_type,
            content: seed.content.to_string(),
        })
        .collect()
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn seed_orders() -> Vec<Order> {
    vec![
        Order {
            order_number: "ORD123456".to_string(),
            date: seed_date(2025, 5, 15),
            customer_email: "john.doe@example.com".to_string(),
            status: "Shipped".to_string(),
            tracking_number: Some("1ZW23X4Y5678901234".to_string()),
            carrier: Some("UPS".to_string()),
            estimated_delivery: Some(seed_date(2025, 5, 22)),
            delivery_date: None,
            items: vec![OrderItem {
                part_number: "W10295370A".to_string(),
                name: "Refrigerator Water Filter".to_string(),
                quantity: 2,
                price: Decimal::new(49_99, 2),
            }],
            total: Decimal::new(99_98, 2),
            shipping_address: ShippingAddress {
                name: "John Doe".to_string(),
                street: "123 Main St".to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip: "12345".to_string(),
            },
        },
        Order {
            order_number: "ORD789012".to_string(),
            date: seed_date(2025, 5, 18),
            customer_email: "jane.smith@example.com".to_string(),
            status: "Processing".to_string(),
            tracking_number: None,
            carrier: None,
            estimated_delivery: None,
            delivery_date: None,
            items: vec![
                OrderItem {
                    part_number: "WPW10503278".to_string(),
                    name: "Dishwasher Control Board".to_string(),
                    quantity: 1,
                    price: Decimal::new(129_99, 2),
                },
                OrderItem {
                    part_number: "NLP8800".to_string(),
                    name: "Installation Kit".to_string(),
                    quantity: 1,
                    price: Decimal::new(24_99, 2),
                },
            ],
            total: Decimal::new(154_98, 2),
            shipping_address: ShippingAddress {
                name: "Jane Smith".to_string(),
                street: "456 Oak Ave".to_string(),
                city: "Somewhere".to_string(),
                state: "NY".to_string(),
                zip: "67890".to_string(),
            },
        },
        Order {
            order_number: "ORD345678".to_string(),
            date: seed_date(2025, 5, 10),
            customer_email: "bob.jones@example.com".to_string(),
            status: "Delivered".to_string(),
            tracking_number: Some("9405803699300493847283".to_string()),
            carrier: Some("USPS".to_string()),
            estimated_delivery: None,
            delivery_date: Some(seed_date(2025, 5, 17)),
            items: vec![OrderItem {
                part_number: "PS11756150".to_string(),
                name: "Dishwasher Lower Rack Assembly".to_string(),
                quantity: 1,
                price: Decimal::new(118_60, 2),
            }],
            total: Decimal::new(118_60, 2),
            shipping_address: ShippingAddress {
                name: "Bob Jones".to_string(),
                street: "789 Pine Blvd".to_string(),
                city: "Elsewhere".to_string(),
                state: "TX".to_string(),
                zip: "13579".to_string(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{seed_docs, seed_orders, seed_parts};
    use crate::docs::DocType;

    #[test]
    fn demo_part_numbers_are_seeded() {
        let parts = seed_parts();
        for number in
            ["W10295370A", "W10190961", "WPW10503278", "WPW10518394", "W10348269", "WPW10438677"]
        {
            assert!(
                parts.iter().any(|part| part.part_number == number),
                "missing demo part {number}"
            );
        }
    }

    #[test]
    fn every_part_has_compatible_models() {
        for part in seed_parts() {
            assert!(!part.compatible_models.is_empty(), "{} has no models", part.part_number);
        }
    }

    #[test]
    fn doc_set_covers_all_types() {
        let docs = seed_docs();
        assert!(docs.iter().any(|doc| doc.doc_type == DocType::Installation));
        assert!(docs.iter().any(|doc| doc.doc_type == DocType::Troubleshooting));
        assert!(docs.iter().any(|doc| doc.doc_type == DocType::Safety));
    }

    #[test]
    fn orders_cover_all_lifecycle_states() {
        let orders = seed_orders();
        let states: Vec<&str> = orders.iter().map(|order| order.status.as_str()).collect();
        assert!(states.contains(&"Shipped"));
        assert!(states.contains(&"Processing"));
        assert!(states.contains(&"Delivered"));
    }
}
