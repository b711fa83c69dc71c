// Record mapper - copies row fields into typed records by member name

use crate::model::Row;
use crate::value::Value;
use std::sync::Arc;

/// Rust types a field value can be assigned to. Conversion is exact: a
/// string field never fills an integer member and vice versa.
pub trait FieldValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FieldValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FieldValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FieldValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

type Setter<T> = Box<dyn Fn(&mut T, &Value) -> bool + Send + Sync>;

struct Member<T> {
    name: String,
    embedded: bool,
    set: Setter<T>,
}

/// Declares which row fields land in which members of `T`.
///
/// ```
/// use seedbed::mapper::RecordSchema;
///
/// #[derive(Default)]
/// struct User {
///     email: String,
///     valid: bool,
/// }
///
/// let schema = RecordSchema::<User>::new()
///     .member("email", |u: &mut User, v: String| u.email = v)
///     .member("valid", |u: &mut User, v: bool| u.valid = v);
/// assert_eq!(schema.member_names(), vec!["email", "valid"]);
/// ```
pub struct RecordSchema<T> {
    members: Vec<Member<T>>,
}

impl<T: 'static> Default for RecordSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> RecordSchema<T> {
    pub fn new() -> Self {
        RecordSchema {
            members: Vec::new(),
        }
    }

    /// Map the row field whose key equals `name` (case-insensitive) to a member.
    pub fn member<V, F>(mut self, name: &str, set: F) -> Self
    where
        V: FieldValue + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.members.push(Member {
            name: name.to_lowercase(),
            embedded: false,
            set: Box::new(move |target: &mut T, value: &Value| match V::from_value(value) {
                Some(v) => {
                    set(target, v);
                    true
                }
                None => false,
            }),
        });
        self
    }

    /// Lift the direct members of an embedded record into this schema.
    /// Only one level is followed: members `schema` itself embeds are dropped.
    pub fn embed<E, A>(mut self, access: A, schema: RecordSchema<E>) -> Self
    where
        E: 'static,
        A: Fn(&mut T) -> &mut E + Send + Sync + 'static,
    {
        let access = Arc::new(access);
        for member in schema.members.into_iter().filter(|m| !m.embedded) {
            let access = Arc::clone(&access);
            let set = member.set;
            self.members.push(Member {
                name: member.name,
                embedded: true,
                set: Box::new(move |target: &mut T, value: &Value| set((*access)(target), value)),
            });
        }
        self
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    /// Assign every member that has a same-named, same-typed field in `row`.
    /// When a key repeats, the last field of the right type wins.
    /// Returns how many members were set; mismatches are skipped silently.
    pub fn apply(&self, row: &Row, target: &mut T) -> usize {
        let mut assigned = 0;
        for member in &self.members {
            let mut set = false;
            for field in row
                .fields()
                .iter()
                .filter(|f| f.key.to_lowercase() == member.name)
            {
                if (member.set)(target, &field.value) {
                    set = true;
                } else {
                    log::debug!(
                        "Skipping field '{}': {} does not fit the member type",
                        field.key,
                        field.value.type_name()
                    );
                }
            }
            if set {
                assigned += 1;
            }
        }
        assigned
    }

    pub fn to_record(&self, row: &Row) -> T
    where
        T: Default,
    {
        let mut record = T::default();
        self.apply(row, &mut record);
        record
    }

    /// Map each row in order and append the records to `dest`.
    pub fn to_records<'r, I>(&self, rows: I, dest: &mut Vec<T>)
    where
        T: Default,
        I: IntoIterator<Item = &'r Row>,
    {
        dest.extend(rows.into_iter().map(|row| self.to_record(row)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, Filter};
    use crate::value::Field;

    #[derive(Debug, Default, PartialEq)]
    struct Credentials {
        password: String,
        email: String,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        credentials: Credentials,
        valid: bool,
        created: i64,
    }

    fn credentials_schema() -> RecordSchema<Credentials> {
        RecordSchema::new()
            .member("Password", |c: &mut Credentials, v: String| c.password = v)
            .member("email", |c: &mut Credentials, v: String| c.email = v)
    }

    fn account_schema() -> RecordSchema<Account> {
        RecordSchema::new()
            .embed(|a: &mut Account| &mut a.credentials, credentials_schema())
            .member("valid", |a: &mut Account, v: bool| a.valid = v)
            .member("created", |a: &mut Account, v: i64| a.created = v)
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::with_fields(vec![
                Field::new("password", "Tim"),
                Field::new("email", "e@x.tld"),
                Field::new("valid", true),
            ]),
            Row::with_fields(vec![
                Field::new("password", "Bob"),
                Field::new("email", "email2@domain.tld"),
                Field::new("valid", false),
            ]),
        ]
    }

    #[test]
    fn test_to_record() {
        let account = account_schema().to_record(&rows()[0]);
        assert_eq!(
            account,
            Account {
                credentials: Credentials {
                    password: "Tim".into(),
                    email: "e@x.tld".into(),
                },
                valid: true,
                created: 0,
            }
        );
    }

    #[test]
    fn test_type_mismatch_left_unset() {
        #[derive(Default)]
        struct Odd {
            email: i64,
            valid: String,
        }
        let schema = RecordSchema::<Odd>::new()
            .member("email", |o: &mut Odd, v: i64| o.email = v)
            .member("valid", |o: &mut Odd, v: String| o.valid = v);

        let mut odd = Odd::default();
        assert_eq!(schema.apply(&rows()[0], &mut odd), 0);
        assert_eq!(odd.email, 0);
        assert_eq!(odd.valid, "");
    }

    #[test]
    fn test_case_insensitive_keys() {
        let row = Row::with_fields(vec![Field::new("EMAIL", "upper@x.tld")]);
        let account = account_schema().to_record(&row);
        assert_eq!(account.credentials.email, "upper@x.tld");
    }

    #[test]
    fn test_embedding_is_one_level() {
        #[derive(Default)]
        struct Outer {
            account: Account,
        }
        let schema = RecordSchema::<Outer>::new().embed(|o: &mut Outer| &mut o.account, account_schema());

        assert_eq!(schema.member_names(), vec!["valid", "created"]);
        let outer = schema.to_record(&rows()[0]);
        assert!(outer.account.valid);
        assert_eq!(outer.account.credentials.email, "");
    }

    #[test]
    fn test_to_records_appends_in_order() {
        let mut accounts = vec![Account::default()];
        account_schema().to_records(&rows(), &mut accounts);

        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[1].credentials.password, "Tim");
        assert_eq!(accounts[2].credentials.password, "Bob");
        assert!(!accounts[2].valid);
    }

    #[test]
    fn test_to_records_from_filtered_rows() {
        let rows = rows();
        let valid = filter(&rows, &[Filter::new("valid", true)]);
        let mut accounts = Vec::new();
        account_schema().to_records(valid, &mut accounts);

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].credentials.email, "e@x.tld");
    }

    #[test]
    fn test_repeated_key_last_fitting_field_wins() {
        let schema = credentials_schema();

        let row = Row::with_fields(vec![Field::new("email", 1), Field::new("email", "x@y")]);
        let mut credentials = Credentials::default();
        assert_eq!(schema.apply(&row, &mut credentials), 1);
        assert_eq!(credentials.email, "x@y");

        let row = Row::with_fields(vec![Field::new("email", "a"), Field::new("email", "b")]);
        let mut credentials = Credentials::default();
        assert_eq!(schema.apply(&row, &mut credentials), 1);
        assert_eq!(credentials.email, "b");
    }
}
