use super::*;
use crate::family::types::Person;

fn ids(people: &[&Person]) -> Vec<String> {
    people.iter().map(|p| p.id.clone()).collect()
}

fn zh() -> NameCollator {
    NameCollator::new("zh")
}

fn en() -> NameCollator {
    NameCollator::new("en")
}

#[test]
fn test_earlier_date_first() {
    let a = Person::new("a").with_dob("1990-01-01");
    let b = Person::new("b").with_dob("1988-05-05");
    let mut v = vec![&a, &b];
    sort_siblings(&mut v, &zh());
    assert_eq!(ids(&v), vec!["b", "a"]);
}

#[test]
fn test_date_beats_birth_order_and_name() {
    let a = Person::new("a").with_dob("1970").with_birth_order(1).with_name("zh", "甲");
    let b = Person::new("b").with_dob("1960").with_birth_order(5).with_name("zh", "乙");
    assert_eq!(compare_siblings(&a, &b, &zh()), Ordering::Greater);
}

#[test]
fn test_birth_order_when_dates_missing() {
    let a = Person::new("a").with_birth_order(3);
    let b = Person::new("b").with_birth_order(1);
    let c = Person::new("c").with_birth_order(2);
    let mut v = vec![&a, &b, &c];
    sort_siblings(&mut v, &zh());
    assert_eq!(ids(&v), vec!["b", "c", "a"]);
}

#[test]
fn test_zero_birth_order_is_ignored() {
    let a = Person::new("a").with_birth_order(0).with_name("en", "Zed");
    let b = Person::new("b").with_birth_order(2).with_name("en", "Amy");
    assert_eq!(compare_siblings(&a, &b, &en()), Ordering::Greater);
}

#[test]
fn test_equal_dates_fall_through_to_birth_order() {
    let a = Person::new("a").with_dob("2000-03-03").with_birth_order(2);
    let b = Person::new("b").with_dob("2000-03-03").with_birth_order(1);
    assert_eq!(compare_siblings(&a, &b, &zh()), Ordering::Greater);
}

#[test]
fn test_names_ignore_case_at_primary_level() {
    let a = Person::new("a").with_name("en", "bob");
    let b = Person::new("b").with_name("en", "Alice");
    let c = Person::new("c").with_name("en", "Carol");
    let mut v = vec![&a, &b, &c];
    sort_siblings(&mut v, &en());
    assert_eq!(ids(&v), vec!["b", "a", "c"]);
}

#[test]
fn test_ties_keep_input_order() {
    let a = Person::new("a");
    let b = Person::new("b");
    let c = Person::new("c");
    let mut v = vec![&c, &a, &b];
    sort_siblings(&mut v, &zh());
    assert_eq!(ids(&v), vec!["c", "a", "b"]);
}

#[test]
fn test_mixed_records_do_not_panic_and_are_deterministic() {
    // a < b by date, b < c by birth order, c < a by name (阿 before 丙): a cycle.
    let a = Person::new("a").with_dob("1950").with_name("zh", "丙");
    let b = Person::new("b").with_dob("1960").with_birth_order(1);
    let c = Person::new("c").with_birth_order(2).with_name("zh", "阿");
    let mut first = vec![&a, &b, &c];
    sort_siblings(&mut first, &zh());
    let mut second = vec![&a, &b, &c];
    sort_siblings(&mut second, &zh());
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.len(), 3);
}

#[test]
fn test_lowercase_before_uppercase_on_case_ties() {
    let people: Vec<Person> = ["b", "A", "a", "B"]
        .iter()
        .map(|n| Person::new(*n).with_name("en", *n))
        .collect();
    let mut v: Vec<&Person> = people.iter().collect();
    sort_siblings(&mut v, &en());
    assert_eq!(ids(&v), vec!["a", "A", "b", "B"]);
}

#[test]
fn test_chinese_names_follow_pinyin_collation() {
    let people = [
        Person::new("chen").with_name("zh", "陈亮"),
        Person::new("lin").with_name("zh", "林秀英"),
        Person::new("wu").with_name("zh", "吴静"),
        Person::new("huang").with_name("zh", "黄珍"),
    ];
    let mut v: Vec<&Person> = people.iter().collect();
    sort_siblings(&mut v, &zh());
    assert_eq!(ids(&v), vec!["chen", "huang", "lin", "wu"]);
}

#[test]
fn test_unparseable_locale_falls_back_to_code_points() {
    let names = NameCollator::new("not a locale!");
    assert_eq!(names.locale(), "not a locale!");
    assert_eq!(names.compare("B", "a"), Ordering::Less);
}
