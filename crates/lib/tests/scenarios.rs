//! End-to-end binding scenarios through the public API.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use envbind::{BindError, bind, bind_with_refresh_interval, env_record, from_env};
use serial_test::serial;

#[derive(Debug, Default, PartialEq)]
struct Named {
  name: String,
}

env_record!(Named {
  name: { env: "SCENARIO_NAME", default: "anon" },
});

#[derive(Debug, Default, PartialEq)]
struct Counted {
  count: i64,
}

env_record!(Counted {
  count: { env: "SCENARIO_COUNT" },
});

#[derive(Debug, Default, PartialEq)]
struct Listed {
  items: Vec<i64>,
}

env_record!(Listed {
  items: { env: "SCENARIO_ITEMS" },
});

#[derive(Debug, Default)]
struct Refreshed {
  v: String,
}

env_record!(Refreshed {
  v: { env: "SCENARIO_V" },
});

#[test]
#[serial]
fn default_used_when_nothing_set() {
  temp_env::with_var_unset("SCENARIO_NAME", || {
    let named: Named = from_env().unwrap();
    assert_eq!(named.name, "anon");
  });
}

#[test]
#[serial]
fn integer_from_environment() {
  temp_env::with_var("SCENARIO_COUNT", Some("7"), || {
    let mut counted = Counted::default();
    bind(&mut counted).unwrap();
    assert_eq!(counted.count, 7);
  });
}

#[test]
#[serial]
fn unparsable_integer_leaves_field_at_zero() {
  temp_env::with_var("SCENARIO_COUNT", Some("seven"), || {
    let mut counted = Counted::default();
    let err = bind(&mut counted).unwrap_err();
    assert!(matches!(err, BindError::Conversion { field: "count", .. }));
    assert_eq!(counted.count, 0);
  });
}

#[test]
#[serial]
fn integer_list_from_environment() {
  temp_env::with_var("SCENARIO_ITEMS", Some("1,2,3"), || {
    let listed: Listed = from_env().unwrap();
    assert_eq!(listed.items, vec![1, 2, 3]);
  });
}

#[test]
#[serial]
fn refresh_observes_mutation() {
  temp_env::with_var("SCENARIO_V", Some("a"), || {
    let runtime = tokio::runtime::Builder::new_current_thread()
      .enable_time()
      .build()
      .unwrap();

    runtime.block_on(async {
      let record = Arc::new(RwLock::new(Refreshed::default()));
      let handle = bind_with_refresh_interval(record.clone(), Duration::from_millis(50)).unwrap();
      assert_eq!(record.read().unwrap().v, "a");

      tokio::time::sleep(Duration::from_millis(60)).await;
      // SAFETY: #[serial] test on a current-thread runtime; nothing else reads the environment concurrently.
      unsafe { std::env::set_var("SCENARIO_V", "b") };

      let deadline = Instant::now() + Duration::from_secs(2);
      while record.read().unwrap().v != "b" && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
      }
      assert_eq!(record.read().unwrap().v, "b");

      handle.stop().await;
    });
  });
}
