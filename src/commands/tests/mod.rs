mod inspect_command_tests;
