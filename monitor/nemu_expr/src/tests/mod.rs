//! Evaluator and operator tests, kept out of the implementation files.
