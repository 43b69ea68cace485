use std::borrow::Cow;

use crate::entity::{Member, Payment};

/// Something a free-text query can be matched against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

fn text<T: AsRef<String>>(value: &T) -> Cow<'_, str> {
    Cow::Borrowed(value.as_ref().as_str())
}

impl Searchable for Member {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            text(self.name()),
            text(self.ref_no()),
            text(self.address()),
            text(self.identity_number()),
            text(self.contact_no()),
            text(self.subscription()),
            text(self.id()),
        ]
    }
}

impl Searchable for Payment {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            text(self.user_id()),
            Cow::Owned(self.year().to_string()),
            Cow::Owned(self.months().joined()),
            text(self.status()),
        ]
    }
}

/// Case-insensitive substring query. An empty query matches everything.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: impl AsRef<str>) -> Self {
        Self(query.as_ref().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }

    pub fn filter<T: Searchable>(&self, items: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::SearchQuery;
    use crate::entity::{
        AreaCode, AreaId, ContactNumber, CoveredMonths, IdentityNumber, Member, MemberAddress,
        MemberId, MemberName, MonthLabel, PaidAt, Payment, PaymentAmount, PaymentId,
        PaymentStatus, PaymentYear, ReferenceNumber, Subscription,
    };

    fn member(name: &str, ref_no: &str) -> Member {
        let code = AreaCode::new("KDY");
        let ref_no = ReferenceNumber::new(ref_no);
        Member::new(
            MemberId::derive(&code, &ref_no),
            ref_no,
            MemberName::new(name),
            IdentityNumber::new("912345678V"),
            MemberAddress::new("12 Temple Road"),
            ContactNumber::new("0771234567"),
            Subscription::new("Gold"),
            code,
            AreaId::new("KDY"),
            None,
            None,
        )
    }

    fn payment(user: &str, months: &[MonthLabel], status: &str) -> Payment {
        Payment::new(
            PaymentId::generate(),
            MemberId::new(user),
            AreaId::new("KDY"),
            PaymentAmount::new(100),
            CoveredMonths::new(months.iter().copied()),
            PaymentYear::new(2024),
            PaidAt::new(datetime!(2024-01-10 10:00 UTC)),
            PaymentStatus::new(status),
            None,
            None,
        )
    }

    #[test]
    fn member_query_matches_reference_number() {
        let members = vec![member("Ali", "3"), member("Beta", "7")];
        let found = SearchQuery::new("7").filter(members);
        assert_eq!(found.len(), 1);
        let name: &String = found[0].name().as_ref();
        assert_eq!(name, "Beta");
    }

    #[test]
    fn member_query_is_case_insensitive() {
        let members = vec![member("Ali", "3"), member("Beta", "7")];
        let found = SearchQuery::new("bEt").filter(members);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn no_match_gives_empty_list() {
        let members = vec![member("Ali", "3"), member("Beta", "7")];
        assert!(SearchQuery::new("zzz").filter(members).is_empty());
    }

    #[test]
    fn empty_query_keeps_everything() {
        let members = vec![member("Ali", "3"), member("Beta", "7")];
        assert_eq!(SearchQuery::new("").filter(members).len(), 2);
    }

    #[test]
    fn payment_query_matches_months_status_and_year() {
        let payments = vec![
            payment("KDY_1", &[MonthLabel::Jan, MonthLabel::Feb], "completed"),
            payment("KDY_2", &[MonthLabel::Mar], "incomplete"),
        ];
        assert_eq!(SearchQuery::new("jan,feb").filter(payments.clone()).len(), 1);
        assert_eq!(SearchQuery::new("INCOMP").filter(payments.clone()).len(), 1);
        assert_eq!(SearchQuery::new("2024").filter(payments.clone()).len(), 2);
        assert_eq!(SearchQuery::new("kdy_2").filter(payments).len(), 1);
    }
}
