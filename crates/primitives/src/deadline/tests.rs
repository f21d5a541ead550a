use std::thread::sleep;

use super::*;

#[test]
fn test_never_expires() {
	let clock = DeadlineClock::unbounded();
	assert!(!clock.is_expired());
	assert_eq!(clock.remaining(), None);
}

#[test]
fn test_zero_budget_expires_immediately() {
	let clock = DeadlineClock::start(Expiration::After(Duration::ZERO));
	assert!(clock.is_expired());
	assert_eq!(clock.remaining(), Some(Duration::ZERO));
}

#[test]
fn test_expires_after_running_time() {
	let clock = DeadlineClock::start(Expiration::After(Duration::from_millis(5)));
	sleep(Duration::from_millis(15));
	assert!(clock.is_expired());
}

#[test]
fn test_paused_time_does_not_count() {
	let mut clock = DeadlineClock::start(Expiration::After(Duration::from_millis(40)));
	clock.pause();
	assert!(!clock.is_running());
	let banked = clock.elapsed();
	sleep(Duration::from_millis(60));
	assert_eq!(clock.elapsed(), banked);
	assert!(!clock.is_expired());

	clock.resume();
	assert!(clock.is_running());
	assert!(clock.elapsed() >= banked);
}

#[test]
fn test_pause_and_resume_are_idempotent() {
	let mut clock = DeadlineClock::unbounded();
	clock.pause();
	clock.pause();
	let banked = clock.elapsed();
	clock.resume();
	clock.resume();
	assert!(clock.elapsed() >= banked);
}

#[test]
fn test_from_millis() {
	assert_eq!(
		Expiration::from_millis(25),
		Ok(Expiration::After(Duration::from_millis(25)))
	);
	assert_eq!(
		Expiration::from_millis(-3),
		Err(BudgetError::NegativeDuration(-3))
	);
}
