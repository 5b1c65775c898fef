//! Runs the emitted instructions on a tiny register model and checks the
//! result against direct left-to-right evaluation.

use arithcc::{Syntax, generate_assembly};
use proptest::prelude::*;

/// Execute the body of `main`, returning `rax` at `ret`.
fn execute(asm: &str, syntax: Syntax) -> i64 {
  let mut rax: i64 = 0;
  let mut lines = asm.lines().skip_while(|line| *line != "main:").skip(1);

  loop {
    let line = lines.next().expect("main must end with ret").trim();
    if line == "ret" {
      return rax;
    }
    let (mnemonic, operands) = line.split_once(' ').expect("instruction has operands");
    let imm: i64 = match syntax {
      Syntax::Intel => operands.strip_prefix("rax, "),
      Syntax::Att => operands
        .strip_suffix(", %rax")
        .and_then(|op| op.strip_prefix('$')),
    }
    .expect("operand shape")
    .parse()
    .expect("immediate");

    rax = match mnemonic {
      "mov" => imm,
      "add" => rax.wrapping_add(imm),
      "sub" => rax.wrapping_sub(imm),
      other => panic!("unexpected mnemonic {other}"),
    };
  }
}

fn render(first: i32, rest: &[(bool, i32)], spaced: bool) -> (String, i64) {
  let sep = if spaced { " " } else { "" };
  let mut expr = first.to_string();
  let mut expected = i64::from(first);
  for &(add, value) in rest {
    let op = if add { '+' } else { '-' };
    expr.push_str(&format!("{sep}{op}{sep}{value}"));
    expected = if add {
      expected.wrapping_add(i64::from(value))
    } else {
      expected.wrapping_sub(i64::from(value))
    };
  }
  (expr, expected)
}

#[test]
fn single_number_returns_itself() {
  let asm = generate_assembly("5", Syntax::Intel).unwrap();
  assert_eq!(execute(&asm, Syntax::Intel), 5);
}

#[test]
fn evaluates_left_to_right() {
  let asm = generate_assembly("10 - 3 - 2", Syntax::Intel).unwrap();
  assert_eq!(execute(&asm, Syntax::Intel), 5);

  let asm = generate_assembly("1-2+3", Syntax::Att).unwrap();
  assert_eq!(execute(&asm, Syntax::Att), 2);
}

#[test]
fn accumulator_goes_negative() {
  let asm = generate_assembly("0-2147483647-2147483647", Syntax::Intel).unwrap();
  assert_eq!(execute(&asm, Syntax::Intel), -4_294_967_294);
}

#[test]
fn spacing_does_not_change_output() {
  assert_eq!(
    generate_assembly("1 + 2 - 3", Syntax::Intel).unwrap(),
    generate_assembly("1+2-3", Syntax::Intel).unwrap()
  );
}

proptest! {
  #[test]
  fn emitted_code_matches_evaluation(
    first in 0..=i32::MAX,
    rest in prop::collection::vec((any::<bool>(), 0..=i32::MAX), 0..16),
    spaced in any::<bool>(),
    att in any::<bool>(),
  ) {
    let syntax = if att { Syntax::Att } else { Syntax::Intel };
    let (expr, expected) = render(first, &rest, spaced);
    let asm = generate_assembly(&expr, syntax).unwrap();
    prop_assert_eq!(execute(&asm, syntax), expected);
    prop_assert_eq!(asm.lines().filter(|line| line.starts_with("    ")).count(), rest.len() + 2);
  }
}
