// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use dealerdesk_app::{
    ContactType, ContactTypeId, ListEntry, MakeListEntry, ReportColumn, ReportDefinition,
    ReportId, ReportService,
};

const INVENTORY_COLUMNS: [(&str, &str); 12] = [
    ("Stock#", "StockNo"),
    ("VIN", "VIN"),
    ("Year", "Year"),
    ("Make", "Make"),
    ("Model", "Model"),
    ("Trim", "Trim"),
    ("Body Style", "BodyStyle"),
    ("Exterior Color", "ExteriorColor"),
    ("Mileage", "Mileage"),
    ("Days in Stock", "DaysInStock"),
    ("List Price", "ListPrice"),
    ("Status", "Status"),
];

const CONTACTS_COLUMNS: [(&str, &str); 9] = [
    ("First Name", "firstName"),
    ("Last Name", "lastName"),
    ("Company", "businessName"),
    ("Type", "type"),
    ("Phone", "phone1"),
    ("Email", "email1"),
    ("City", "City"),
    ("State", "State"),
    ("Created", "created"),
];

const DEALS_COLUMNS: [(&str, &str); 9] = [
    ("Deal#", "dealno"),
    ("Customer", "customer"),
    ("Deal Type", "dealtype"),
    ("Stock#", "StockNo"),
    ("Sale Date", "saledate"),
    ("Sale Price", "saleprice"),
    ("Down Payment", "downpayment"),
    ("Salesperson", "salesperson"),
    ("Status", "dealstatus"),
];

const ACCOUNTS_COLUMNS: [(&str, &str); 9] = [
    ("Account#", "accountnumber"),
    ("Customer", "customer"),
    ("Account Type", "accounttype"),
    ("Balance", "balance"),
    ("Next Payment", "nextpaymentdate"),
    ("Payment Amount", "paymentamount"),
    ("Days Late", "dayslate"),
    ("Lender", "lender"),
    ("Status", "accountstatus"),
];

const REPORT_NAMES: [&str; 8] = [
    "Aged Inventory",
    "Weekly Sales",
    "Past Due Accounts",
    "Lot Walk",
    "Buyer Follow-up",
    "Month End",
    "Floor Plan Audit",
    "Title Tracking",
];

const MAKES: [(&str, &[&str]); 8] = [
    ("Ford", &["F-150", "Escape", "Explorer", "Mustang"]),
    ("Chevrolet", &["Silverado", "Equinox", "Malibu"]),
    ("Toyota", &["Camry", "Corolla", "RAV4", "Tacoma"]),
    ("Honda", &["Accord", "Civic", "CR-V"]),
    ("Land Rover", &["Defender", "Discovery"]),
    ("Mercedes-Benz", &["C-Class", "GLE"]),
    ("Nissan", &["Altima", "Rogue"]),
    ("Aston Martin", &[]),
];

const CONTACT_TYPES: [&str; 6] = ["Buyer", "Co-Buyer", "Lender", "Vendor", "Insurance", "Lead"];

pub fn column_catalog(service: ReportService) -> &'static [(&'static str, &'static str)] {
    match service {
        ReportService::Inventory => &INVENTORY_COLUMNS,
        ReportService::Contacts => &CONTACTS_COLUMNS,
        ReportService::Deals => &DEALS_COLUMNS,
        ReportService::Accounts => &ACCOUNTS_COLUMNS,
    }
}

/// Lower-case, space-free make names as used for model lookups.
pub fn make_lookup_keys() -> Vec<String> {
    MAKES
        .iter()
        .map(|(name, _)| name.to_lowercase().replace(' ', ""))
        .collect()
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let state = seed ^ 0x2545_F491_4F6C_DD1D;
        Self {
            state: if state == 0 { 0x9E37_79B9_7F4A_7C15 } else { state },
        }
    }

    fn next_u64(&mut self) -> u64 {
        // splitmix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

#[derive(Debug, Clone)]
pub struct DealerFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl DealerFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = seed.max(1);
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    /// Every column a report over `service` can show, in catalog order.
    pub fn report_columns(&self, service: ReportService) -> Vec<ReportColumn> {
        column_catalog(service)
            .iter()
            .map(|(name, data)| ReportColumn::new(*name, *data))
            .collect()
    }

    /// A user report with two to five distinct columns of `service` in
    /// random order.
    pub fn report(&mut self, service: ReportService) -> ReportDefinition {
        let mut pool = self.report_columns(service);
        let count = 2 + self.int_n(4);
        let mut columns = Vec::with_capacity(count);
        while columns.len() < count && !pool.is_empty() {
            let index = self.int_n(pool.len());
            columns.push(pool.remove(index));
        }

        let name = REPORT_NAMES[self.int_n(REPORT_NAMES.len())];
        ReportDefinition {
            id: ReportId::new(format!("rpt-{}-{}", service.as_str(), self.rng.next_u64() % 10_000)),
            name: name.to_owned(),
            is_default: false,
            columns,
        }
    }

    pub fn default_report(&mut self, service: ReportService) -> ReportDefinition {
        ReportDefinition {
            is_default: true,
            name: format!("{} (default)", service.label()),
            ..self.report(service)
        }
    }

    /// Makes as the inventory service spells them, mixed case.
    pub fn automakes(&self) -> Vec<MakeListEntry> {
        MAKES
            .iter()
            .map(|(name, _)| MakeListEntry {
                name: (*name).to_owned(),
                logo: None,
            })
            .collect()
    }

    /// Models for a lookup key such as `"landrover"`; unknown makes have none.
    pub fn automake_models(&self, make_key: &str) -> Vec<ListEntry> {
        MAKES
            .iter()
            .find(|(name, _)| name.to_lowercase().replace(' ', "") == make_key)
            .map(|(_, models)| {
                models
                    .iter()
                    .map(|model| ListEntry {
                        name: (*model).to_owned(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contact_types(&self) -> Vec<ContactType> {
        CONTACT_TYPES
            .iter()
            .enumerate()
            .map(|(index, name)| ContactType {
                id: ContactTypeId::new((index + 1).to_string()),
                name: (*name).to_owned(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{DealerFaker, column_catalog, make_lookup_keys};
    use dealerdesk_app::ReportService;
    use std::collections::BTreeSet;

    #[test]
    fn same_seed_same_report() {
        let mut left = DealerFaker::new(42);
        let mut right = DealerFaker::new(42);
        assert_eq!(
            left.report(ReportService::Deals),
            right.report(ReportService::Deals)
        );
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(DealerFaker::new(0).seed(), 1);
    }

    #[test]
    fn catalog_keys_are_unique_per_service() {
        for service in ReportService::ALL {
            let catalog = column_catalog(service);
            let keys = catalog.iter().map(|(_, data)| *data).collect::<BTreeSet<_>>();
            assert_eq!(keys.len(), catalog.len(), "service {service:?}");
        }
    }

    #[test]
    fn report_columns_come_from_the_catalog_without_repeats() {
        for seed in 0_u64..50 {
            let mut faker = DealerFaker::new(seed);
            for service in ReportService::ALL {
                let report = faker.report(service);
                assert!((2..=5).contains(&report.columns.len()), "seed {seed}");
                assert!(!report.is_default);

                let catalog = faker.report_columns(service);
                let keys = report
                    .columns
                    .iter()
                    .map(|column| column.data.clone())
                    .collect::<BTreeSet<_>>();
                assert_eq!(keys.len(), report.columns.len(), "seed {seed}");
                for column in &report.columns {
                    assert!(catalog.contains(column), "seed {seed}: {column:?}");
                }
            }
        }
    }

    #[test]
    fn default_report_is_flagged() {
        let mut faker = DealerFaker::new(7);
        let report = faker.default_report(ReportService::Inventory);
        assert!(report.is_default);
        assert_eq!(report.name, "Inventory (default)");
    }

    #[test]
    fn models_follow_lookup_keys() {
        let faker = DealerFaker::new(3);
        assert!(make_lookup_keys().contains(&"landrover".to_owned()));
        assert_eq!(faker.automake_models("landrover").len(), 2);
        assert!(faker.automake_models("astonmartin").is_empty());
        assert!(faker.automake_models("delorean").is_empty());
    }

    #[test]
    fn contact_type_ids_are_distinct() {
        let types = DealerFaker::new(5).contact_types();
        let ids = types.iter().map(|kind| kind.id.clone()).collect::<BTreeSet<_>>();
        assert_eq!(ids.len(), types.len());
    }

    #[test]
    fn variety_across_seeds() {
        let mut shapes = BTreeSet::new();
        for seed in 0_u64..20 {
            let mut faker = DealerFaker::new(seed);
            let report = faker.report(ReportService::Inventory);
            shapes.insert(
                report
                    .columns
                    .iter()
                    .map(|column| column.data.to_string())
                    .collect::<Vec<_>>(),
            );
        }
        assert!(shapes.len() >= 10, "got {}", shapes.len());
    }
}
