use super::compile;
use crate::error::Error;
use indoc::indoc;

/// A whole class with fields, a constructor, a method, and a static
/// function sharing one label counter — large enough that an inline
/// `assert_eq!` would be unreadable, so it is snapshot-tested instead.
#[test]
fn full_class_compiles_to_expected_vm_text() {
  let src = indoc! {"
    class Fraction {
      field int numerator, denominator;
      static int count;

      constructor Fraction new(int n, int d) {
        let numerator = n;
        let denominator = d;
        let count = count + 1;
        return this;
      }

      method int getNumerator() {
        return numerator;
      }

      method Fraction plus(Fraction other) {
        var Fraction sum;
        let sum = Fraction.new(numerator, denominator);
        while (sum.getNumerator() < 0) {
          do sum.reduce();
        }
        if (sum.getNumerator() = 0) {
          do Output.printString(\"zero\");
        } else {
          do Output.printString(\"nonzero\");
        }
        return sum;
      }

      function int instanceCount() {
        return count;
      }
    }
  "};
  insta::assert_snapshot!(compile(src).unwrap());
}

#[test]
fn empty_main_returns_zero() {
  let src = indoc! {"
    class Main {
      function void main() {
        return;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Main.main 0
      push constant 0
      return
    "}
  );
}

#[test]
fn constructor_allocates_and_seats_this() {
  let src = indoc! {"
    class Point {
      field int x, y;

      constructor Point new(int ax, int ay) {
        let x = ax;
        let y = ay;
        return this;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Point.new 0
      push constant 2
      call Memory.alloc 1
      pop pointer 0
      push argument 0
      pop this 0
      push argument 1
      pop this 1
      push pointer 0
      return
    "}
  );
}

#[test]
fn method_prologue_seats_this_from_argument_zero() {
  let src = indoc! {"
    class Counter {
      field int n;

      method int get() {
        return n;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Counter.get 0
      push argument 0
      pop pointer 0
      push this 0
      return
    "}
  );
}

#[test]
fn while_loop_uses_two_labels() {
  let src = indoc! {"
    class Main {
      function void main() {
        var int i;
        let i = 0;
        while (i < 10) {
          let i = i + 1;
        }
        return;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Main.main 1
      push constant 0
      pop local 0
      label WHILE_EXP0
      push local 0
      push constant 10
      lt
      not
      if-goto WHILE_END0
      push local 0
      push constant 1
      add
      pop local 0
      goto WHILE_EXP0
      label WHILE_END0
      push constant 0
      return
    "}
  );
}

#[test]
fn if_else_uses_three_labels() {
  let src = indoc! {"
    class Main {
      static int x;

      function void main() {
        if (true) {
          let x = 1;
        } else {
          let x = 2;
        }
        return;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Main.main 0
      push constant 0
      not
      if-goto IF_TRUE0
      goto IF_FALSE0
      label IF_TRUE0
      push constant 1
      pop static 0
      goto IF_END0
      label IF_FALSE0
      push constant 2
      pop static 0
      label IF_END0
      push constant 0
      return
    "}
  );
}

#[test]
fn do_statement_discards_return_value() {
  let src = indoc! {"
    class Main {
      function void main() {
        do Output.printString(\"Hi\");
        return;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Main.main 0
      push constant 2
      call String.new 1
      push constant 72
      call String.appendChar 2
      push constant 105
      call String.appendChar 2
      call Output.printString 1
      pop temp 0
      push constant 0
      return
    "}
  );
}

#[test]
fn nested_array_assignment_stashes_in_temp() {
  let src = indoc! {"
    class Main {
      function void main() {
        var Array a;
        var int i, j;
        let a[i] = a[j];
        return;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Main.main 3
      push local 0
      push local 1
      add
      push local 0
      push local 2
      add
      pop pointer 1
      push that 0
      pop temp 0
      pop pointer 1
      push temp 0
      pop that 0
      push constant 0
      return
    "}
  );
}

#[test]
fn method_call_on_variable_receiver_bumps_arg_count() {
  let src = indoc! {"
    class Main {
      function void main() {
        var Point p;
        do p.move(1, 2);
        return;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Main.main 1
      push local 0
      push constant 1
      push constant 2
      call Point.move 3
      pop temp 0
      push constant 0
      return
    "}
  );
}

#[test]
fn bare_call_pushes_this_and_calls_current_class() {
  let src = indoc! {"
    class Main {
      method void helper() {
        return;
      }

      method void run() {
        do helper();
        return;
      }
    }
  "};
  let vm = compile(src).unwrap();
  assert!(vm.contains("push pointer 0\ncall Main.helper 1\n"));
}

#[test]
fn unknown_identifier_is_reported_with_name() {
  let src = indoc! {"
    class Main {
      function void main() {
        let missing = 1;
        return;
      }
    }
  "};
  let err = compile(src).unwrap_err();
  match err {
    Error::UnknownIdentifier { name, .. } => assert_eq!(name, "missing"),
    other => panic!("expected UnknownIdentifier, got {other:?}"),
  }
}

#[test]
fn keyword_constants_compile_to_constant_pushes() {
  let src = indoc! {"
    class Main {
      function boolean test() {
        return true;
      }
    }
  "};
  assert_eq!(
    compile(src).unwrap(),
    indoc! {"
      function Main.test 0
      push constant 0
      not
      return
    "}
  );
}
