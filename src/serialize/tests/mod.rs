mod proptest_serialize;
