mod attendance_test;
mod billing_test;
mod slots_test;
mod subscriptions_test;
mod test_utils;
