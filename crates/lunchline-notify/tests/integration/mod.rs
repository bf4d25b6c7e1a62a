mod telegram_api;
