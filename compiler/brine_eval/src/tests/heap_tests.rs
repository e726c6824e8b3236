//! Allocation, references and collection as seen from programs.

use super::{output_of, run_config};
use crate::InterpreterConfig;
use pretty_assertions::assert_eq;

const NODE: &str = "class Node { int v; ref var next; }\n";

fn threshold(gc_initial_threshold: usize) -> InterpreterConfig {
    InterpreterConfig {
        gc_initial_threshold,
        ..InterpreterConfig::default()
    }
}

#[test]
fn loop_allocations_are_reclaimed() {
    let source = "
for (int i = 0; i < 10; i += 1) {
    alloc int[] t = [i];
}
println(heap_live());
";
    let outcome = run_config(source, threshold(2));
    outcome.result.unwrap();
    assert_eq!(outcome.output, "1\n");
    assert_eq!(outcome.interp.collections(), 5);
    assert_eq!(outcome.interp.heap().live_count(), 1);
}

#[test]
fn freed_chunks_are_reused() {
    let source = "
for (int i = 0; i < 10; i += 1) {
    alloc int[] t = [i];
}
";
    let outcome = run_config(source, threshold(2));
    outcome.result.unwrap();
    assert_eq!(outcome.interp.heap().capacity(), 3);
}

#[test]
fn disabled_collector_only_runs_on_request() {
    let source = "
for (int i = 0; i < 10; i += 1) {
    alloc int[] t = [i];
}
println(heap_live(), collect(), heap_live());
";
    let config = InterpreterConfig {
        gc_enabled: false,
        ..threshold(1)
    };
    let outcome = run_config(source, config);
    outcome.result.unwrap();
    assert_eq!(outcome.output, "10 9 1\n");
    assert_eq!(outcome.interp.collections(), 1);
}

#[test]
fn redeclaration_orphans_the_old_chunk() {
    let source = "
alloc int a = 1;
alloc int a = 2;
println(collect(), heap_live(), a);
";
    assert_eq!(output_of(source), "1 1 2\n");
}

#[test]
fn unreachable_cycles_are_collected() {
    let source = format!(
        "{NODE}
func make_cycle() {{
    alloc int seed = 0;
    alloc Node a = Node(1, seed);
    alloc Node b = Node(2, a);
    a.next = b;
}}
make_cycle();
println(heap_live());
println(collect());
println(heap_live());
"
    );
    assert_eq!(output_of(&source), "3\n3\n0\n");
}

#[test]
fn reachable_cycles_survive_and_display() {
    let source = format!(
        "{NODE}
alloc int seed = 0;
alloc Node a = Node(1, seed);
alloc Node b = Node(2, a);
a.next = b;
println(collect());
println(a.next.next.v);
println(a);
"
    );
    assert_eq!(
        output_of(&source),
        "0\n1\nNode { v: 1, next: Node { v: 2, next: Node { v: 1, next: <cycle #2> } } }\n"
    );
}

#[test]
fn chunks_referenced_from_inline_values_survive() {
    let source = "
class Box { ref int[] items; }
func make() -> Box {
    alloc int[] xs = [4, 5];
    return Box(xs);
}
Box b = make();
println(collect(), b.items);
";
    assert_eq!(output_of(source), "0 [4, 5]\n");
}

#[test]
fn same_compares_chunks() {
    let source = "
alloc int[] a = [1];
ref int[] b = a;
alloc int[] c = [1];
println(same(a, b), same(a, c));
";
    assert_eq!(output_of(source), "true false\n");
}

#[test]
fn bind_attaches_a_receiver() {
    let source = "
class Acc { int total; func add; }
func add_impl(int n) { this.total += n; }
alloc Acc acc = Acc(0, add_impl);
func bound = bind(add_impl, acc);
bound(3);
bound(4);
println(acc.total);
";
    assert_eq!(output_of(source), "7\n");
}

#[test]
fn bound_receivers_are_roots() {
    let source = "
class Acc { int total; func add; }
func add_impl(int n) { this.total += n; }
func make() -> func {
    alloc Acc acc = Acc(0, add_impl);
    return bind(add_impl, acc);
}
func adder = make();
println(collect());
adder(5);
println(heap_live());
";
    assert_eq!(output_of(source), "0\n1\n");
}

#[test]
fn bind_requires_a_heap_object() {
    let source = "
func f() { }
int x = 1;
bind(f, x);
";
    let err = super::error_of(source);
    assert_eq!(
        err.message,
        "expected a heap reference for the receiver of `bind`, found num 1"
    );
}
