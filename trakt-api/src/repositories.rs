use crate::endpoints::{
    checkin::{CheckinEpisode, ShowRef},
    comments::{
        CommentReplies, EpisodeComments, GetComment, MovieComments, SeasonComments, ShowComments,
    },
    MediaType,
    movies::{
        FavoritedMovies, GetMovie, GetMovieRatings, PlayedMovies, PopularMovies, TrendingMovies,
        WatchedMovies,
    },
    oauth::{ExchangeRefreshToken, PollDeviceToken, RequestDeviceCode, RevokeToken},
    progress::{ListPlayback, RemovePlayback, ShowProgress},
    recommendations::{
        HideRecommendation, MovieRecommendations, RecommendationKind, ShowRecommendations,
        UnhideRecommendation,
    },
    search::{SearchMovies, SearchShows},
    shows::{
        FavoritedShows, GetShow, GetShowRatings, PlayedShows, PopularShows, TrendingShows,
        WatchedShows,
    },
    sync::{AddRatings, ListRatings, ListWatchedMovies, ListWatchedShows, RatingItems, RemoveRatings},
};
use secrecy::SecretString;

/// Every OAuth request carries the application credentials in its body.
pub struct OAuthRepository;

impl OAuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn device_code(&self, client_id: impl Into<String>) -> RequestDeviceCode {
        RequestDeviceCode::new(client_id)
    }

    pub fn device_token(
        &self,
        device_code: SecretString,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> PollDeviceToken {
        PollDeviceToken::new(device_code, client_id, client_secret)
    }

    pub fn refresh(
        &self,
        refresh_token: SecretString,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> ExchangeRefreshToken {
        ExchangeRefreshToken::new(refresh_token, client_id, client_secret)
    }

    pub fn revoke(
        &self,
        access_token: SecretString,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> RevokeToken {
        RevokeToken::new(access_token, client_id, client_secret)
    }
}

pub struct ShowRepository;

impl ShowRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn trending(&self) -> TrendingShows {
        TrendingShows::new()
    }

    pub fn popular(&self) -> PopularShows {
        PopularShows::new()
    }

    pub fn favorited(&self) -> FavoritedShows {
        FavoritedShows::new()
    }

    pub fn played(&self) -> PlayedShows {
        PlayedShows::new()
    }

    pub fn watched(&self) -> WatchedShows {
        WatchedShows::new()
    }

    pub fn get(&self, id: impl Into<String>) -> GetShow {
        GetShow::new(id)
    }

    pub fn ratings(&self, id: impl Into<String>) -> GetShowRatings {
        GetShowRatings::new(id)
    }

    pub fn comments(&self, id: impl Into<String>) -> ShowComments {
        ShowComments::new(id)
    }

    pub fn season_comments(&self, id: impl Into<String>, season: u32) -> SeasonComments {
        SeasonComments::new(id, season)
    }

    pub fn episode_comments(&self, id: impl Into<String>, season: u32, episode: u32) -> EpisodeComments {
        EpisodeComments::new(id, season, episode)
    }

    pub fn progress(&self, id: impl Into<String>) -> ShowProgress {
        ShowProgress::new(id)
    }
}

pub struct MovieRepository;

impl MovieRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn trending(&self) -> TrendingMovies {
        TrendingMovies::new()
    }

    pub fn popular(&self) -> PopularMovies {
        PopularMovies::new()
    }

    pub fn favorited(&self) -> FavoritedMovies {
        FavoritedMovies::new()
    }

    pub fn played(&self) -> PlayedMovies {
        PlayedMovies::new()
    }

    pub fn watched(&self) -> WatchedMovies {
        WatchedMovies::new()
    }

    pub fn get(&self, id: impl Into<String>) -> GetMovie {
        GetMovie::new(id)
    }

    pub fn ratings(&self, id: impl Into<String>) -> GetMovieRatings {
        GetMovieRatings::new(id)
    }

    pub fn comments(&self, id: impl Into<String>) -> MovieComments {
        MovieComments::new(id)
    }
}

pub struct SearchRepository;

impl SearchRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn shows(&self, query: impl Into<String>) -> SearchShows {
        SearchShows::new(query)
    }

    pub fn movies(&self, query: impl Into<String>) -> SearchMovies {
        SearchMovies::new(query)
    }
}

pub struct SyncRepository;

impl SyncRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn watched_shows(&self) -> ListWatchedShows {
        ListWatchedShows
    }

    pub fn watched_movies(&self) -> ListWatchedMovies {
        ListWatchedMovies
    }

    pub fn ratings(&self, kind: MediaType) -> ListRatings {
        ListRatings::new(kind)
    }

    pub fn add_ratings(&self, items: RatingItems) -> AddRatings {
        AddRatings::new(items)
    }

    pub fn remove_ratings(&self, items: RatingItems) -> RemoveRatings {
        RemoveRatings::new(items)
    }

    pub fn playback(&self) -> ListPlayback {
        ListPlayback::new()
    }

    pub fn remove_playback(&self, id: u64) -> RemovePlayback {
        RemovePlayback::new(id)
    }
}

pub struct CheckinRepository;

impl CheckinRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn episode(&self, show: ShowRef, season: u32, number: u32) -> CheckinEpisode {
        CheckinEpisode::new(show, season, number)
    }
}

pub struct CommentRepository;

impl CommentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self, id: u64) -> GetComment {
        GetComment::new(id)
    }

    pub fn replies(&self, id: u64) -> CommentReplies {
        CommentReplies::new(id)
    }
}

pub struct RecommendationRepository;

impl RecommendationRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn movies(&self) -> MovieRecommendations {
        MovieRecommendations::new()
    }

    pub fn shows(&self) -> ShowRecommendations {
        ShowRecommendations::new()
    }

    pub fn hide(&self, kind: RecommendationKind, id: impl Into<String>) -> HideRecommendation {
        HideRecommendation::new(kind, id)
    }

    pub fn unhide(&self, kind: RecommendationKind, id: &str) -> UnhideRecommendation {
        UnhideRecommendation::new(kind, id)
    }
}
