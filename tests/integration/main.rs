mod contacts_tests;
