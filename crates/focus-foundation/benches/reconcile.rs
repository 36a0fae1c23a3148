use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use focus_core::platform::{FocusChangeListener, FocusHost, FocusTarget, RegionId};
use focus_core::runtime::{DefaultScheduler, Runtime};
use focus_core::selection::SelectionState;
use focus_foundation::{FocusAdapter, FocusIndex, RegionBridge};

const ADAPTER_COUNTS: &[u32] = &[4, 16, 64];

#[derive(Default)]
struct QuietHost {
    targets: RefCell<HashMap<RegionId, FocusTarget>>,
    responder: Cell<Option<FocusTarget>>,
    listeners: RefCell<HashMap<FocusTarget, FocusChangeListener>>,
}

impl FocusHost for QuietHost {
    fn locate_focus_target(&self, region: RegionId) -> Option<FocusTarget> {
        self.targets.borrow().get(&region).copied()
    }

    fn make_first_responder(&self, target: Option<FocusTarget>) -> bool {
        let current = self.responder.get();
        if current == target {
            return false;
        }
        self.responder.set(target);
        if let Some(old) = current {
            let listener = self.listeners.borrow().get(&old).cloned();
            if let Some(listener) = listener {
                listener(false);
            }
        }
        true
    }

    fn set_focus_change_listener(&self, target: FocusTarget, listener: FocusChangeListener) {
        self.listeners.borrow_mut().insert(target, listener);
    }
}

struct Fixture {
    runtime: Runtime,
    selection: SelectionState,
    adapters: Vec<FocusAdapter>,
}

impl Fixture {
    fn new(adapter_count: u32) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let selection = SelectionState::with_runtime(0, runtime.handle());
        let host = Rc::new(QuietHost::default());
        let adapters = (1..=adapter_count)
            .map(|index| {
                let region = RegionId::new(index as u64);
                host.targets
                    .borrow_mut()
                    .insert(region, FocusTarget::new(index as u64));
                let bridge = RegionBridge::new(host.clone(), region);
                FocusAdapter::new(
                    FocusIndex::new(index).expect("positive index"),
                    selection.clone(),
                    bridge,
                    runtime.handle(),
                )
            })
            .collect();
        Self {
            runtime,
            selection,
            adapters,
        }
    }

    fn drive(&self, selection: i32) {
        self.selection.set(selection);
        let snapshot = self.selection.get();
        for adapter in &self.adapters {
            adapter.reconcile(black_box(snapshot));
        }
        self.runtime.handle().flush_deferred().expect("flush");
    }
}

fn bench_reconcile_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_pass");
    for &count in ADAPTER_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let fixture = Fixture::new(count);
            let mut next = 1;
            b.iter(|| {
                fixture.drive(next);
                next = next % count as i32 + 1;
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconcile_pass);
criterion_main!(benches);
