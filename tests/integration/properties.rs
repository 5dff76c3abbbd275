//! Properties that hold for every value at every budget.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use reprobate::{render, render_with, Bytes, Counter, Inspect, Object, Policy};

fn corpus() -> Vec<Box<dyn Inspect>> {
    let mut nested: BTreeMap<String, Vec<Vec<i64>>> = BTreeMap::new();
    for i in 0..8 {
        nested.insert(format!("key-{i}"), vec![(0..i).collect(); 3]);
    }
    let mut wide: HashMap<u32, String> = HashMap::new();
    for i in 0..40 {
        wide.insert(i, "v".repeat(i as usize));
    }
    vec![
        Box::new(42),
        Box::new(-1.5e300),
        Box::new('\u{7}'),
        Box::new("quotes ' and \" and \\ and \t"),
        Box::new("ünïcödé ✓ text that runs long enough to be cut"),
        Box::new(Bytes::from(&b"\x00binary\xffdata with some length"[..])),
        Box::new((0..500).collect::<Vec<u16>>()),
        Box::new((0..50).collect::<VecDeque<i8>>()),
        Box::new((0..30).collect::<BTreeSet<u64>>()),
        Box::new(nested),
        Box::new(wide),
        Box::new(("tuple", 1, 2.5, vec!["x"; 12])),
        Box::new(["the", "quick", "brown", "fox"].into_iter().collect::<Counter<_>>()),
        Box::new(
            Object::new("Widget")
                .with("id", 7)
                .with("tags", vec!["alpha", "beta", "gamma", "delta"])
                .with("parent", Object::new("Frame").with("w", 640).with("h", 480)),
        ),
        Box::new(Vec::<i32>::new()),
    ]
}

/// Sum the items a flat integer list rendering accounts for, shown or
/// counted. `None` when the rendering carries no count information.
fn accounted(out: &str) -> Option<usize> {
    let inner = out.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() || inner == "..." {
        return None;
    }
    if let Some(n) = inner
        .strip_prefix("...")
        .and_then(|rest| rest.strip_suffix(" items"))
    {
        return n.parse().ok();
    }
    inner
        .split(", ")
        .map(|token| {
            match token
                .strip_prefix("...")
                .and_then(|rest| rest.strip_suffix(" more"))
            {
                Some(n) => n.parse().ok(),
                None => Some(1),
            }
        })
        .sum()
}

#[test]
fn test_output_never_exceeds_budget() {
    for value in corpus() {
        for policy in [Policy::Greedy, Policy::Even] {
            for budget in 0..=160 {
                let out = render_with(value.as_ref(), budget, policy);
                assert!(
                    out.chars().count() <= budget,
                    "{} chars at budget {budget} ({policy}): {out}",
                    out.chars().count()
                );
            }
        }
    }
}

#[test]
fn test_rendering_is_deterministic() {
    for value in corpus() {
        for budget in [0, 3, 17, 40, 99, 200] {
            assert_eq!(render(value.as_ref(), budget), render(value.as_ref(), budget));
        }
    }
}

#[test]
fn test_counts_are_exact() {
    for total in [3usize, 10, 57, 1000] {
        let items: Vec<usize> = (0..total).collect();
        for policy in [Policy::Greedy, Policy::Even] {
            for budget in 5..=120 {
                let out = render_with(&items, budget, policy);
                if let Some(n) = accounted(&out) {
                    assert_eq!(n, total, "budget {budget} ({policy}): {out}");
                }
            }
        }
    }
}

#[test]
fn test_larger_budget_shows_no_fewer_items() {
    let items: Vec<u32> = (0..200).collect();
    let mut previous = 0;
    for budget in 20..=60 {
        let out = render(&items, budget);
        let shown = out
            .trim_matches(|c| c == '[' || c == ']')
            .split(", ")
            .filter(|token| !token.starts_with("..."))
            .count();
        assert!(shown >= previous, "budget {budget}: {out}");
        previous = shown;
    }
}

#[test]
fn test_empty_containers() {
    assert_eq!(render(&Vec::<i32>::new(), 10), "[]");
    assert_eq!(render(&BTreeSet::<i32>::new(), 10), "set()");
    assert_eq!(render(&BTreeMap::<i32, i32>::new(), 10), "{}");
    assert_eq!(render(&VecDeque::<i32>::new(), 20), "VecDeque()");
    assert_eq!(render(&Counter::<i32>::new(), 20), "Counter()");
}

fn user() -> BTreeMap<&'static str, Box<dyn Inspect>> {
    let mut user: BTreeMap<&'static str, Box<dyn Inspect>> = BTreeMap::new();
    user.insert("name", Box::new("alice"));
    user.insert("scores", Box::new(vec![98, 87, 95, 72, 88]));
    user
}

fn shown(out: &str, labels: &[&str]) -> usize {
    labels.iter().filter(|label| out.contains(*label)).count()
}

#[test]
fn test_larger_budget_shows_no_fewer_entries() {
    let user = user();
    let job = Object::new("Job")
        .with("id", 7)
        .with("name", "build")
        .with("steps", vec![1, 2, 3, 4, 5]);
    let cases: [(&dyn Inspect, &[&str]); 2] = [
        (&user, &["'name': ", "'scores': "]),
        (&job, &["id=", "name=", "steps="]),
    ];
    for (value, labels) in cases {
        let mut previous = 0;
        for budget in 0..=80 {
            let out = render(value, budget);
            let count = shown(&out, labels);
            assert!(count >= previous, "budget {budget}: {out}");
            previous = count;
        }
        assert_eq!(previous, labels.len());
    }
}

#[test]
fn test_nested_values_never_collapse_to_bare_markers() {
    let widget = Object::new("Widget")
        .with("id", 7)
        .with("tags", vec!["alpha", "beta", "gamma", "delta"])
        .with("parent", Object::new("Frame").with("w", 640).with("h", 480));
    for budget in 0..=90 {
        let out = render(&widget, budget);
        for bad in ["parent=<Frame>", "parent=Frame(...", "tags=[...", "tags=<Vec>"] {
            assert!(!out.contains(bad), "budget {budget}: {out}");
        }
    }

    let user = user();
    for budget in 0..=60 {
        let out = render(&user, budget);
        assert!(!out.contains("'scores': [..."), "budget {budget}: {out}");
    }
    assert_eq!(render(&user, 40), "{'name': 'alice', 'scores': <Vec(5)>}");
}
