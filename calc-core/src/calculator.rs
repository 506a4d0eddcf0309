//! The immediate-execution calculator engine.
//!
//! Each binary operation is executed as soon as the next operator (or equals)
//! is entered, so `2 * 3 + 1 =` evaluates as `(2 * 3) + 1` with no regard for
//! operator precedence.
//!
//! # State
//!
//! The engine holds a first operand (the running result), an optional second
//! operand, an optional pending binary operator and a slot marker naming which
//! operand receives input. Three flags decide how the next keystroke lands:
//!
//! | Flag                   | Meaning |
//! |------------------------|---------|
//! | `is_dirty`             | something has been entered since construction or all-clear |
//! | `awaiting_fresh_input` | the next digit or number overwrites the active operand |
//! | `pending_sign_flip`    | the active operand is a zero whose sign change must carry over to the next number |
//!
//! The memory register and the angle unit live alongside and survive
//! [`Calculator::all_clear`].
//!
//! # Example
//!
//! ```
//! use calc_core::{BinaryOperation, Calculator};
//!
//! let mut calculator = Calculator::new();
//! calculator.input_digit(2).unwrap();
//! calculator.input_operation(BinaryOperation::Multiply).unwrap();
//! calculator.input_digit(3).unwrap();
//! calculator.input_operation(BinaryOperation::Add).unwrap();
//! calculator.input_digit(1).unwrap();
//!
//! assert_eq!(calculator.evaluate(), Ok(7.0));
//! ```

use std::fmt;

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, trace, warn};

use crate::error::CalculatorError;
use crate::operand::Operand;
use crate::operations::{
    BinaryOperation, Configuration, MemoryFunction, SpecialInput, TrigMode, UnaryOperation,
};

/// Which operand currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    First,
    Second,
}

/// A single-step calculator session.
///
/// Invariants, upheld by every method:
/// - a second operand exists only while an operator is pending;
/// - the active slot is `Second` only while a second operand exists;
/// - a pending sign flip implies the active operand is a zero.
#[derive(Debug, Clone)]
pub struct Calculator {
    first: Operand,
    second: Option<Operand>,
    pending_op: Option<BinaryOperation>,
    active: Slot,
    pending_sign_flip: bool,
    awaiting_fresh_input: bool,
    is_dirty: bool,
    trig_mode: TrigMode,
    memory: f64,
    rng: SmallRng,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator in radians mode with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Creates a calculator whose random numbers are reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use calc_core::{Calculator, SpecialInput};
    ///
    /// let mut a = Calculator::with_seed(9);
    /// let mut b = Calculator::with_seed(9);
    /// a.input_special(SpecialInput::RandomNumber);
    /// b.input_special(SpecialInput::RandomNumber);
    ///
    /// assert_eq!(a.display_value(), b.display_value());
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    /// Sets the starting angle unit.
    pub fn with_trig_mode(
        mut self,
        mode: TrigMode,
    ) -> Self {
        self.trig_mode = mode;
        self
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            first: Operand::default(),
            second: None,
            pending_op: None,
            active: Slot::First,
            pending_sign_flip: false,
            awaiting_fresh_input: false,
            is_dirty: false,
            trig_mode: TrigMode::default(),
            memory: 0.0,
            rng,
        }
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// The value of the operand currently receiving input.
    ///
    /// Right after [`evaluate`](Self::evaluate) this is the result, since the
    /// active slot collapses back to the first operand.
    pub fn display_value(&self) -> f64 {
        self.active().value()
    }

    /// Whether the active operand is in fractional entry, so a display can
    /// show a trailing decimal point before any fractional digit is typed.
    pub fn has_decimal_point(&self) -> bool {
        self.active().has_decimal_point()
    }

    /// The operand currently receiving input, including its typed fraction.
    pub fn active_operand(&self) -> &Operand {
        self.active()
    }

    /// The operator waiting for its second operand, if any.
    pub fn pending_operation(&self) -> Option<BinaryOperation> {
        self.pending_op
    }

    pub fn trig_mode(&self) -> TrigMode {
        self.trig_mode
    }

    /// The memory register.
    pub fn memory(&self) -> f64 {
        self.memory
    }

    // =========================================================================
    // Numeric input
    // =========================================================================

    /// Appends a digit to the active operand.
    ///
    /// After an evaluation (or any other terminal operation) the digit starts
    /// a new number instead of extending the result. After an operator it
    /// starts the second operand.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::InvalidInput`] if `digit` is greater than 9.
    pub fn input_digit(
        &mut self,
        digit: u8,
    ) -> Result<(), CalculatorError> {
        if digit > 9 {
            warn!(digit, "rejected digit outside 0-9");
            return Err(CalculatorError::InvalidInput(digit));
        }

        self.begin_entry();
        self.active_mut().input_digit(digit);
        self.record_input();

        trace!(digit, display = self.display_value(), "digit entered");
        Ok(())
    }

    /// Enters each digit in turn, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::InvalidInput`] for the first digit greater
    /// than 9; digits before it have already been entered.
    pub fn input_digits(
        &mut self,
        digits: &[u8],
    ) -> Result<(), CalculatorError> {
        digits.iter().try_for_each(|&digit| self.input_digit(digit))
    }

    /// Switches the active operand to fractional entry.
    ///
    /// Inserting a second decimal point before the next digit is a no-op.
    pub fn insert_decimal_point(&mut self) {
        self.begin_entry();
        self.active_mut().insert_decimal_point();
        self.record_input();

        trace!("decimal point inserted");
    }

    /// Replaces the active operand with a whole number.
    ///
    /// A sign change entered before the number is applied to it.
    pub fn input_number(
        &mut self,
        number: f64,
    ) {
        let number = if self.pending_sign_flip {
            self.pending_sign_flip = false;
            -number
        } else {
            number
        };

        self.select_slot_for_replacement();
        self.active_mut().set(number);
        self.record_input();

        trace!(number, "number entered");
    }

    /// Replaces the active operand with a constant or a random number.
    ///
    /// The next digit starts a new number.
    pub fn input_special(
        &mut self,
        input: SpecialInput,
    ) {
        let value = input.value(&mut self.rng);

        self.select_slot_for_replacement();
        self.active_mut().set(value);
        self.finish_replacement();

        debug!(%input, value, "special input");
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Enters a binary operator.
    ///
    /// - With no operator pending, `op` becomes the pending operator.
    /// - With an operator pending but no second operand yet, `op` replaces it.
    /// - With both present, the pending operation is evaluated first and `op`
    ///   then applies to its result.
    ///
    /// # Errors
    ///
    /// Returns a calculation error if the implicit evaluation is undefined; the
    /// previously pending operator stays in place.
    pub fn input_operation(
        &mut self,
        op: BinaryOperation,
    ) -> Result<(), CalculatorError> {
        match (self.pending_op, self.second.is_some()) {
            (None, _) => {}
            (Some(previous), false) => {
                debug!(%previous, replacement = %op, "operator replaced");
            }
            (Some(_), true) => {
                self.evaluate()?;
            }
        }

        self.pending_op = Some(op);
        self.pending_sign_flip = false;
        self.record_input();

        debug!(%op, first = self.first.value(), "operator pending");
        Ok(())
    }

    /// Applies a unary operation to the active operand.
    ///
    /// The first operand cannot be changed once an operator has been entered;
    /// in that window every operation except sign change is ignored. On success
    /// the next digit starts a new number.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::UndefinedUnary`] if the operand lies outside
    /// the operation's domain; nothing is changed.
    pub fn input_unary(
        &mut self,
        op: UnaryOperation,
    ) -> Result<(), CalculatorError> {
        if op == UnaryOperation::SignChange {
            self.change_sign();
            return Ok(());
        }

        if self.first_operand_locked() {
            debug!(%op, "ignored: first operand is locked behind a pending operator");
            return Ok(());
        }

        let operand = self.display_value();
        let result = op.apply(operand, self.trig_mode).ok_or_else(|| {
            warn!(%op, operand, trig_mode = %self.trig_mode, "unary operation undefined");
            CalculatorError::UndefinedUnary {
                operation: op,
                operand,
            }
        })?;

        self.active_mut().set(result);
        self.finish_replacement();

        debug!(%op, operand, result, "unary operation applied");
        Ok(())
    }

    /// Evaluates the pending operation and returns the result.
    ///
    /// Without an operator or without a second operand the first operand is
    /// returned unchanged, and a dangling operator is dropped. Either way the
    /// next digit starts a new number.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::UndefinedBinary`] if the operation is
    /// undefined for its operands; nothing is changed.
    ///
    /// # Example
    ///
    /// ```
    /// use calc_core::{BinaryOperation, Calculator};
    ///
    /// let mut calculator = Calculator::new();
    /// calculator.input_number(5.0);
    /// calculator.input_operation(BinaryOperation::Divide).unwrap();
    /// calculator.input_number(0.0);
    ///
    /// assert_eq!(calculator.evaluate(), Ok(f64::INFINITY));
    /// ```
    pub fn evaluate(&mut self) -> Result<f64, CalculatorError> {
        let result = match (self.pending_op, &self.second) {
            (Some(op), Some(second)) => {
                let (lhs, rhs) = (self.first.value(), second.value());
                let result = op.apply(lhs, rhs).ok_or_else(|| {
                    warn!(%op, lhs, rhs, "binary operation undefined");
                    CalculatorError::UndefinedBinary {
                        operation: op,
                        lhs,
                        rhs,
                    }
                })?;

                debug!(%op, lhs, rhs, result, "evaluated");
                self.first.set(result);
                result
            }
            _ => self.first.value(),
        };

        self.second = None;
        self.pending_op = None;
        self.active = Slot::First;
        self.pending_sign_flip = false;
        self.awaiting_fresh_input = true;

        Ok(result)
    }

    /// Applies a configuration change.
    pub fn set_config(
        &mut self,
        config: Configuration,
    ) {
        match config {
            Configuration::ToggleDegreesOrRadians => {
                self.trig_mode = self.trig_mode.toggled();
                debug!(trig_mode = %self.trig_mode, "angle unit toggled");
            }
        }
    }

    // =========================================================================
    // Memory
    // =========================================================================

    /// Clears the memory register, or adds/subtracts the active operand to it.
    ///
    /// Adding and subtracting are ignored while the first operand is locked
    /// behind a pending operator.
    pub fn perform_memory(
        &mut self,
        function: MemoryFunction,
    ) {
        match function {
            MemoryFunction::Clear => self.memory = 0.0,
            MemoryFunction::Add | MemoryFunction::Subtract => {
                if self.first_operand_locked() {
                    debug!(%function, "ignored: first operand is locked behind a pending operator");
                    return;
                }

                let value = self.display_value();
                if function == MemoryFunction::Add {
                    self.memory += value;
                } else {
                    self.memory -= value;
                }
                self.awaiting_fresh_input = true;
            }
        }

        debug!(%function, memory = self.memory, "memory updated");
    }

    /// Copies the memory register into the active operand and returns it.
    ///
    /// Right after an operator, the recalled value becomes the second operand.
    pub fn recall_memory(&mut self) -> f64 {
        if self.follows_binary_operator() {
            self.redirect_input_to_second_operand();
        }

        let memory = self.memory;
        self.active_mut().set(memory);
        self.finish_replacement();

        debug!(memory, "memory recalled");
        memory
    }

    /// Resets both operands, the pending operator and the input flags.
    ///
    /// The memory register and the angle unit are kept.
    pub fn all_clear(&mut self) {
        self.first.reset();
        self.second = None;
        self.pending_op = None;
        self.active = Slot::First;
        self.is_dirty = false;
        self.pending_sign_flip = false;
        self.awaiting_fresh_input = false;

        debug!("all clear");
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn active(&self) -> &Operand {
        match (self.active, &self.second) {
            (Slot::Second, Some(second)) => second,
            _ => &self.first,
        }
    }

    fn active_mut(&mut self) -> &mut Operand {
        match (self.active, &mut self.second) {
            (Slot::Second, Some(second)) => second,
            _ => &mut self.first,
        }
    }

    /// An operator has been entered but its second operand has not begun.
    fn follows_binary_operator(&self) -> bool {
        self.pending_op.is_some() && self.second.is_none()
    }

    fn first_operand_locked(&self) -> bool {
        self.active == Slot::First && self.pending_op.is_some()
    }

    fn redirect_input_to_second_operand(&mut self) {
        self.second = Some(Operand::default());
        self.active = Slot::Second;
    }

    /// Picks the slot a wholesale replacement writes to: the second operand
    /// whenever an operator is pending, the first otherwise.
    fn select_slot_for_replacement(&mut self) {
        if self.pending_op.is_none() {
            self.active = Slot::First;
        } else if self.second.is_none() {
            self.redirect_input_to_second_operand();
        } else {
            self.active = Slot::Second;
        }
    }

    /// Shared preamble of digit and decimal-point entry.
    fn begin_entry(&mut self) {
        if self.awaiting_fresh_input {
            self.active_mut().reset();
            self.awaiting_fresh_input = false;
        }

        if self.follows_binary_operator() {
            self.redirect_input_to_second_operand();
        }

        // The deferred sign must survive a fresh-input reset.
        if self.pending_sign_flip {
            self.pending_sign_flip = false;
            let operand = self.active_mut();
            if operand.value().is_sign_positive() {
                operand.negate();
            }
        }
    }

    fn record_input(&mut self) {
        self.is_dirty = true;
        self.awaiting_fresh_input = false;
    }

    /// Bookkeeping after a terminal replacement of the active operand.
    fn finish_replacement(&mut self) {
        self.is_dirty = true;
        self.pending_sign_flip = false;
        self.awaiting_fresh_input = true;
    }

    fn change_sign(&mut self) {
        if self.follows_binary_operator() {
            self.redirect_input_to_second_operand();
        }

        let operand = self.active_mut();
        operand.negate();
        let value = operand.value();

        // A negated zero has no digits yet: carry its sign to the next number,
        // unless it is a finished result about to be overwritten.
        if value == 0.0 && !(self.is_dirty && self.awaiting_fresh_input) {
            self.pending_sign_flip = value.is_sign_negative();
        }

        trace!(display = value, pending_sign_flip = self.pending_sign_flip, "sign changed");
    }
}

impl fmt::Display for Calculator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "a: {}, b: ", self.first)?;
        match &self.second {
            Some(second) => write!(f, "{second}")?,
            None => write!(f, "none")?,
        }
        write!(f, ", operation: ")?;
        match self.pending_op {
            Some(op) => write!(f, "{op}")?,
            None => write!(f, "none")?,
        }
        write!(f, ", memory: {}, mode: {}", self.memory, self.trig_mode)
    }
}
