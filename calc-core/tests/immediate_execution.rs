//! Behavioural tests for the calculator engine, driven only through its public
//! key-press API. Most scenarios run twice: once typing numbers digit by digit
//! and once entering them as whole numbers.

use calc_core::{
    BinaryOperation, Calculator, MemoryFunction, SpecialInput, UnaryOperation,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, Copy)]
enum InputMethod {
    Digits,
    Number,
}

const INPUT_METHODS: [InputMethod; 2] = [InputMethod::Digits, InputMethod::Number];

/// Enters an integer the way a user would: digits first, then a sign change
/// for negative numbers; or as a single whole number.
fn enter(
    calculator: &mut Calculator,
    number: i64,
    method: InputMethod,
) {
    match method {
        InputMethod::Digits => {
            for digit in number.unsigned_abs().to_string().bytes() {
                calculator
                    .input_digit(digit - b'0')
                    .expect("digit should be accepted");
            }
            if number < 0 {
                calculator
                    .input_unary(UnaryOperation::SignChange)
                    .expect("sign change never fails");
            }
        }
        InputMethod::Number => calculator.input_number(number as f64),
    }
}

fn run(
    lhs: i64,
    op: BinaryOperation,
    rhs: i64,
    method: InputMethod,
) -> f64 {
    let mut calculator = Calculator::with_seed(0);
    enter(&mut calculator, lhs, method);
    calculator.input_operation(op).unwrap();
    enter(&mut calculator, rhs, method);
    calculator.evaluate().unwrap()
}

#[test]
fn test_input_methods_agree() {
    for number in [12, -23, 456, 9999, 0, -9999, 6] {
        let mut by_digits = Calculator::with_seed(0);
        let mut by_number = Calculator::with_seed(0);

        enter(&mut by_digits, number, InputMethod::Digits);
        enter(&mut by_number, number, InputMethod::Number);

        assert_eq!(by_digits.display_value(), by_number.display_value());
    }
}

#[test]
fn test_number_input_evaluates_to_itself() {
    for method in INPUT_METHODS {
        for number in [0, 1, 12, -12, 345, -67, 1_234_567_890] {
            let mut calculator = Calculator::with_seed(0);
            enter(&mut calculator, number, method);

            assert_eq!(calculator.display_value(), number as f64);
            assert_eq!(calculator.evaluate(), Ok(number as f64));
        }
    }
}

#[test]
fn test_partial_evaluation() {
    let cases = [
        (4, BinaryOperation::Multiply, 2),
        (-30, BinaryOperation::Subtract, 10),
        (9, BinaryOperation::Divide, -5),
        (19, BinaryOperation::Add, 13),
    ];

    for method in INPUT_METHODS {
        for (a, op, b) in cases {
            let mut calculator = Calculator::with_seed(0);
            enter(&mut calculator, a, method);
            calculator.input_operation(op).unwrap();

            assert_eq!(calculator.evaluate(), Ok(a as f64));

            enter(&mut calculator, b, method);

            assert_eq!(calculator.evaluate(), Ok(b as f64));
        }
    }
}

#[test]
fn test_basic_arithmetic() {
    let cases = [
        (4, BinaryOperation::Multiply, 2, 8.0),
        (-30, BinaryOperation::Subtract, 10, -40.0),
        (9, BinaryOperation::Divide, -5, -1.8),
        (19, BinaryOperation::Add, 13, 32.0),
        (2, BinaryOperation::Power, 8, 256.0),
    ];

    for method in INPUT_METHODS {
        for (a, op, b, expected) in cases {
            assert_eq!(run(a, op, b, method), expected, "{a} {op} {b}");
        }
    }
}

#[test]
fn test_implicit_evaluation_is_left_associative() {
    let cases = [
        ((2, BinaryOperation::Multiply, 3), BinaryOperation::Add, 1, 7.0),
        ((5, BinaryOperation::Subtract, 2), BinaryOperation::Multiply, 3, 9.0),
        ((10, BinaryOperation::Add, -3), BinaryOperation::Multiply, 7, 49.0),
        ((144, BinaryOperation::Divide, 12), BinaryOperation::Divide, 3, 4.0),
    ];

    for method in INPUT_METHODS {
        for ((a, op1, b), op2, c, expected) in cases {
            let mut calculator = Calculator::with_seed(0);
            enter(&mut calculator, a, method);
            calculator.input_operation(op1).unwrap();
            enter(&mut calculator, b, method);
            calculator.input_operation(op2).unwrap();

            // The intermediate result is shown as soon as the second operator lands.
            assert_eq!(
                calculator.display_value(),
                BinaryOperation::apply(&op1, a as f64, b as f64).unwrap()
            );

            enter(&mut calculator, c, method);

            assert_eq!(calculator.evaluate(), Ok(expected));
        }
    }
}

#[test]
fn test_operator_overriding() {
    for method in INPUT_METHODS {
        let mut calculator = Calculator::with_seed(0);
        enter(&mut calculator, 2, method);
        calculator.input_operation(BinaryOperation::Multiply).unwrap();
        calculator.input_operation(BinaryOperation::Subtract).unwrap();
        enter(&mut calculator, 2, method);

        assert_eq!(calculator.evaluate(), Ok(0.0));
    }
}

#[test]
fn test_sign_change_twice_restores_value() {
    for method in INPUT_METHODS {
        for number in [0, 7, -7, 1234] {
            let mut calculator = Calculator::with_seed(0);
            enter(&mut calculator, number, method);

            calculator.input_unary(UnaryOperation::SignChange).unwrap();
            calculator.input_unary(UnaryOperation::SignChange).unwrap();

            assert_eq!(calculator.display_value(), number as f64);
        }
    }
}

#[test]
fn test_sign_change_before_second_operand() {
    for method in INPUT_METHODS {
        let mut calculator = Calculator::with_seed(0);
        enter(&mut calculator, 1, method);
        calculator.input_operation(BinaryOperation::Add).unwrap();
        calculator.input_unary(UnaryOperation::SignChange).unwrap();
        enter(&mut calculator, 3, method);

        assert_eq!(calculator.evaluate(), Ok(-2.0));
    }
}

#[test]
fn test_sign_change_then_equals_reflects_negation() {
    let mut calculator = Calculator::with_seed(0);
    calculator.input_number(4.0);
    calculator.input_operation(BinaryOperation::Multiply).unwrap();
    calculator.input_unary(UnaryOperation::SignChange).unwrap();

    let result = calculator.evaluate().unwrap();

    assert_eq!(result, 0.0);
    assert!(result.is_sign_negative());
}

#[test]
fn test_negative_entry_mirrors_positive_entry() {
    for starting in [0.0, 40.0, 1.0] {
        let mut positive = Calculator::with_seed(0);
        positive.input_number(starting);
        positive.input_digits(&[1, 2, 3]).unwrap();

        let mut negative = Calculator::with_seed(0);
        negative.input_number(starting);
        negative.input_unary(UnaryOperation::SignChange).unwrap();
        negative.input_digits(&[1, 2, 3]).unwrap();

        assert_eq!(negative.display_value(), -positive.display_value());
    }
}

#[test]
fn test_decimal_insertion_by_digits() {
    let mut calculator = Calculator::with_seed(0);

    calculator.input_digits(&[1, 2, 3]).unwrap();
    calculator.insert_decimal_point();
    calculator.input_digits(&[0, 4, 5, 6]).unwrap();

    let mut reference = Calculator::with_seed(0);
    reference.input_number(123.0456);
    assert_eq!(calculator.display_value(), reference.display_value());
}

#[test]
fn test_repeated_decimal_point_is_ignored() {
    let mut calculator = Calculator::with_seed(0);

    calculator.input_digit(3).unwrap();
    calculator.insert_decimal_point();
    calculator.input_digit(1).unwrap();
    calculator.insert_decimal_point();
    calculator.input_digit(4).unwrap();

    assert_eq!(calculator.display_value(), 3.14);
}

#[test]
fn test_division_edge_cases() {
    for method in INPUT_METHODS {
        assert_eq!(run(5, BinaryOperation::Divide, 0, method), f64::INFINITY);
        assert_eq!(run(-5, BinaryOperation::Divide, 0, method), f64::NEG_INFINITY);
        assert!(run(0, BinaryOperation::Divide, 0, method).is_nan());
    }
}

#[test]
fn test_input_after_evaluation_starts_fresh() {
    let mut calculator = Calculator::with_seed(0);
    calculator.input_digit(1).unwrap();
    calculator.input_operation(BinaryOperation::Add).unwrap();
    calculator.input_digit(2).unwrap();
    assert_eq!(calculator.evaluate(), Ok(3.0));

    let mut expected = 0.0;
    for digit in [9, 8, 6, 6, 5, 1, 2, 3] {
        calculator.input_digit(digit).unwrap();
        expected = expected * 10.0 + f64::from(digit);

        assert_eq!(calculator.display_value(), expected);
    }
    assert_eq!(calculator.evaluate(), Ok(expected));
}

#[test]
fn test_terminal_operations_request_fresh_input() {
    type Terminal = fn(&mut Calculator);
    let terminals: [(&str, Terminal); 5] = [
        ("evaluate", |c| {
            c.evaluate().unwrap();
        }),
        ("unary", |c| c.input_unary(UnaryOperation::Square).unwrap()),
        ("memory add", |c| c.perform_memory(MemoryFunction::Add)),
        ("memory recall", |c| {
            c.recall_memory();
        }),
        ("special", |c| c.input_special(SpecialInput::Pi)),
    ];

    for (name, terminal) in terminals {
        let mut calculator = Calculator::with_seed(0);
        calculator.input_digits(&[4, 2]).unwrap();
        terminal(&mut calculator);

        calculator.input_digit(8).unwrap();

        assert_eq!(calculator.display_value(), 8.0, "after {name}");
    }
}

#[test]
fn test_memory_survives_all_clear() {
    let mut calculator = Calculator::with_seed(0);

    calculator.input_number(12.5);
    calculator.perform_memory(MemoryFunction::Add);
    calculator.all_clear();
    calculator.input_number(2.5);
    calculator.perform_memory(MemoryFunction::Subtract);
    calculator.all_clear();
    calculator.input_number(40.0);
    calculator.perform_memory(MemoryFunction::Add);
    calculator.all_clear();

    assert_eq!(calculator.display_value(), 0.0);
    assert_eq!(calculator.recall_memory(), 50.0);
    assert_eq!(calculator.display_value(), 50.0);
}

#[test]
fn test_calculation_error_leaves_display_unchanged() {
    let mut calculator = Calculator::with_seed(0);
    calculator.input_number(5.5);

    let error = calculator
        .input_unary(UnaryOperation::Factorial)
        .unwrap_err();

    assert!(error.is_calculation_error());
    assert_eq!(calculator.display_value(), 5.5);

    // The session keeps working without a clear.
    calculator.input_operation(BinaryOperation::Add).unwrap();
    calculator.input_number(0.5);
    assert_eq!(calculator.evaluate(), Ok(6.0));
}

#[test]
fn test_even_roots_of_negatives_are_calculation_errors() {
    let mut unary = Calculator::with_seed(0);
    unary.input_number(-4.0);
    let unary_error = unary.input_unary(UnaryOperation::SquareRoot).unwrap_err();

    let mut binary = Calculator::with_seed(0);
    binary.input_number(-4.0);
    binary.input_operation(BinaryOperation::NthRoot).unwrap();
    binary.input_number(2.0);
    let binary_error = binary.evaluate().unwrap_err();

    assert!(unary_error.is_calculation_error());
    assert!(binary_error.is_calculation_error());
    assert_eq!(unary.display_value(), -4.0);
    assert_eq!(binary.display_value(), 2.0);
    assert_eq!(binary.pending_operation(), Some(BinaryOperation::NthRoot));
}

#[test]
fn test_percentage_of_second_operand() {
    let mut calculator = Calculator::with_seed(0);
    calculator.input_number(80.0);
    calculator.input_operation(BinaryOperation::Multiply).unwrap();
    calculator.input_number(25.0);
    calculator.input_unary(UnaryOperation::Percentage).unwrap();

    assert_eq!(calculator.evaluate(), Ok(20.0));
}

#[test]
fn test_pending_operation_tracks_operator_highlight() {
    let mut calculator = Calculator::with_seed(0);
    assert_eq!(calculator.pending_operation(), None);

    calculator.input_number(3.0);
    calculator.input_operation(BinaryOperation::Divide).unwrap();
    assert_eq!(calculator.pending_operation(), Some(BinaryOperation::Divide));

    calculator.input_number(4.0);
    calculator.evaluate().unwrap();
    assert_eq!(calculator.pending_operation(), None);
}
