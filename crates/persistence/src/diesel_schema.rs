// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    owners (owner_id) {
        owner_id -> BigInt,
        login_name -> Text,
        display_name -> Text,
        password_hash -> Text,
        created_at -> Text,
        last_login_at -> Nullable<Text>,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        owner_id -> BigInt,
        created_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    plans (plan_id) {
        plan_id -> BigInt,
        slug -> Text,
        name -> Text,
        description -> Nullable<Text>,
        start_date -> Text,
        end_date -> Text,
        mode -> Text,
        available_dates -> Text,
        time_windows -> Nullable<Text>,
        desired_duration -> Nullable<Integer>,
        creator_id -> Text,
        creator_name -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    responses (response_id) {
        response_id -> BigInt,
        plan_id -> BigInt,
        guest_name -> Text,
        selected_dates -> Text,
        comment -> Nullable<Text>,
        selected_time_windows -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::joinable!(sessions -> owners (owner_id));
diesel::joinable!(responses -> plans (plan_id));

diesel::allow_tables_to_appear_in_same_query!(owners, sessions, plans, responses,);
