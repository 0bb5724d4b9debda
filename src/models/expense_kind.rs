//! Recognized monthly expense categories
//!
//! Each kind carries the fixed text its shared transaction is posted with.
//! The table is the single place to extend when a new bill is added.

/// How the memo of a shared expense is derived from the current date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoRule {
    /// "<Month> <Year>" of the month after the current one
    NextMonth,
    /// One billing cycle running from `start` of last month to `end` of this month
    BillingCycle { start: u32, end: u32 },
    /// Two billing cycles joined with "&", the second reduced to its "to" fragment
    TwoBillingCycles {
        first: (u32, u32),
        second: (u32, u32),
    },
}

/// A recognized monthly expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpenseKind {
    Condominium,
    Electricity,
    TvInternetPhone,
    Water,
}

struct KindInfo {
    kind: ExpenseKind,
    category_name: &'static str,
    payee_name: &'static str,
    memo_rule: MemoRule,
}

const KINDS: [KindInfo; 4] = [
    KindInfo {
        kind: ExpenseKind::Condominium,
        category_name: "Condominium",
        payee_name: "Loja do Condomínio",
        memo_rule: MemoRule::NextMonth,
    },
    KindInfo {
        kind: ExpenseKind::Electricity,
        category_name: "Electricity",
        payee_name: "EDP",
        memo_rule: MemoRule::BillingCycle { start: 11, end: 10 },
    },
    KindInfo {
        kind: ExpenseKind::TvInternetPhone,
        category_name: "TV / Internet / Phone",
        payee_name: "Vodafone",
        memo_rule: MemoRule::TwoBillingCycles {
            first: (9, 8),
            second: (16, 15),
        },
    },
    KindInfo {
        kind: ExpenseKind::Water,
        category_name: "Water",
        payee_name: "EPAL",
        memo_rule: MemoRule::BillingCycle { start: 4, end: 3 },
    },
];

impl ExpenseKind {
    /// Every recognized kind, sorted by category name
    pub const ALL: [ExpenseKind; 4] = [
        ExpenseKind::Condominium,
        ExpenseKind::Electricity,
        ExpenseKind::TvInternetPhone,
        ExpenseKind::Water,
    ];

    /// Look up a kind by its exact category name
    pub fn from_category_name(name: &str) -> Option<Self> {
        KINDS
            .iter()
            .find(|info| info.category_name == name)
            .map(|info| info.kind)
    }

    fn info(self) -> &'static KindInfo {
        // KINDS is indexed in declaration order of the enum
        &KINDS[self as usize]
    }

    /// The category name used as catalog key
    pub fn category_name(self) -> &'static str {
        self.info().category_name
    }

    /// The payee the shared account pays for this expense
    pub fn payee_name(self) -> &'static str {
        self.info().payee_name
    }

    /// How the memo for this expense is built
    pub fn memo_rule(self) -> MemoRule {
        self.info().memo_rule
    }
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.category_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_enum_order() {
        for kind in ExpenseKind::ALL {
            assert_eq!(kind.info().kind, kind);
        }
    }

    #[test]
    fn test_all_is_sorted_by_name() {
        let names: Vec<&str> = ExpenseKind::ALL.iter().map(|k| k.category_name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            ExpenseKind::from_category_name("TV / Internet / Phone"),
            Some(ExpenseKind::TvInternetPhone)
        );
        assert_eq!(ExpenseKind::from_category_name("water"), None);
        assert_eq!(ExpenseKind::from_category_name("Groceries"), None);
    }

    #[test]
    fn test_payee_names() {
        assert_eq!(ExpenseKind::Condominium.payee_name(), "Loja do Condomínio");
        assert_eq!(ExpenseKind::Electricity.payee_name(), "EDP");
        assert_eq!(ExpenseKind::Water.payee_name(), "EPAL");
        assert_eq!(ExpenseKind::TvInternetPhone.payee_name(), "Vodafone");
    }
}
