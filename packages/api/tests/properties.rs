//! Property tests for the configuration accumulators

use proptest::prelude::*;
use reqflow::Builder;

fn token() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn values() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{0,6}", 1..4)
}

fn query_values(b: &Builder, key: &str) -> Vec<String> {
    b.url()
        .unwrap()
        .query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

proptest! {
    #[test]
    fn last_param_call_wins(key in token(), calls in prop::collection::vec(values(), 1..5)) {
        let mut b = Builder::new("https://example.com/?keep=1");
        for vals in &calls {
            b = b.param(key.clone(), vals.clone());
        }

        prop_assert_eq!(query_values(&b, &key), calls.last().cloned().unwrap());
        if key != "keep" {
            prop_assert_eq!(query_values(&b, "keep"), vec!["1".to_string()]);
        }
    }

    #[test]
    fn last_header_call_wins(key in token(), calls in prop::collection::vec(values(), 1..5)) {
        let name = format!("x-{key}");
        prop_assume!(name != "x-other");
        let mut b = Builder::new("https://example.com").header("x-other", ["o"]);
        for vals in &calls {
            b = b.header(name.clone(), vals.clone());
        }

        let req = b.request().unwrap().unwrap();
        let sent: Vec<String> = req
            .headers()
            .get_all(name.as_str())
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(sent, calls.last().cloned().unwrap());
        prop_assert_eq!(req.headers()["x-other"].to_str().unwrap(), "o");
    }

    #[test]
    fn every_cookie_call_adds_a_cookie(pairs in prop::collection::vec((token(), "[a-z0-9]{1,6}"), 1..8)) {
        let mut b = Builder::new("https://example.com");
        for (name, value) in &pairs {
            b = b.cookie(name.clone(), value.clone());
        }

        let cookies = b.request().unwrap().unwrap().cookies();
        prop_assert_eq!(cookies.len(), pairs.len());
        for (cookie, (name, value)) in cookies.iter().zip(&pairs) {
            prop_assert_eq!(&cookie.key, name);
            prop_assert_eq!(&cookie.value, value);
        }
    }

    #[test]
    fn arbitrary_cookie_values_add_one_cookie_each(pairs in prop::collection::vec((token(), ".{0,8}"), 1..8)) {
        let mut b = Builder::new("https://example.com");
        for (name, value) in &pairs {
            b = b.cookie(name.clone(), value.clone());
        }

        let cookies = b.request().unwrap().unwrap().cookies();
        prop_assert_eq!(cookies.len(), pairs.len());
        for (cookie, (name, _)) in cookies.iter().zip(&pairs) {
            prop_assert_eq!(&cookie.key, name);
        }
    }

    #[test]
    fn clones_never_share_appends(left in prop::collection::vec(token(), 0..4), right in prop::collection::vec(token(), 0..4)) {
        let base = Builder::new("https://example.com/base").param("shared", ["1"]).cookie("c", "0");
        let before = base.url().unwrap();

        let mut a = base.clone();
        let mut b = base.clone();
        for fragment in &left {
            a = a.path(fragment.clone()).param(fragment.clone(), ["a"]).cookie(fragment.clone(), "a");
        }
        for fragment in &right {
            b = b.path(fragment.clone()).header(format!("x-{fragment}"), ["b"]);
        }

        prop_assert_eq!(base.url().unwrap(), before);
        prop_assert_eq!(a.paths(), left.as_slice());
        prop_assert_eq!(b.paths(), right.as_slice());
        prop_assert_eq!(a.cookies().len(), 1 + left.len());
        prop_assert_eq!(b.cookies().len(), 1);
        prop_assert!(a.header_overrides().is_empty());
        prop_assert_eq!(b.params().len(), 1);
    }
}
