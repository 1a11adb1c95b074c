use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    ZhTw,
    En,
}

impl Locale {
    pub fn other(self) -> Self {
        match self {
            Self::ZhTw => Self::En,
            Self::En => Self::ZhTw,
        }
    }

    pub fn html_lang(self) -> &'static str {
        match self {
            Self::ZhTw => "zh-Hant",
            Self::En => "en",
        }
    }
}

/// Looks `key` up in `locale`, then in English, then gives the key back.
pub fn translate(locale: Locale, key: &'static str) -> &'static str {
    lookup(locale, key)
        .or_else(|| lookup(Locale::En, key))
        .unwrap_or(key)
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    match locale {
        Locale::ZhTw => zh_tw(key),
        Locale::En => en(key),
    }
}

fn zh_tw(key: &str) -> Option<&'static str> {
    Some(match key {
        "voting.system" => "投票系統",
        "voting.description" => "創建投票或參與投票，附上原因的投票會有更高權重",
        "create.new.poll" => "創建新投票",
        "cancel.create" => "取消創建",
        "no.polls" => "還沒有任何投票，創建第一個投票吧！",
        "no.my.polls" => "您還沒有創建任何投票",
        "tab.all" => "所有投票",
        "tab.mine" => "我的投票",
        "loading.polls" => "載入投票中...",

        "create.poll.form" => "創建新投票",
        "poll.title" => "投票主題",
        "poll.title.placeholder" => "輸入投票主題...",
        "poll.description" => "描述（可選）",
        "poll.description.placeholder" => "輸入投票描述...",
        "poll.options" => "投票選項",
        "option.placeholder" => "選項",
        "add.option" => "新增選項",
        "remove.option" => "移除選項",
        "poll.expires" => "截止時間（可選）",
        "create.poll" => "創建投票",
        "creating" => "創建中...",

        "vote.reason" => "投票原因（可選，附上原因會增加投票權重）",
        "vote.reason.bonus" => "(加倍權重)",
        "vote.reason.placeholder" => "請說明您的投票原因...",
        "vote" => "投票",
        "voting" => "投票中...",
        "view.results" => "查看結果",
        "voting.results" => "投票結果",
        "total.votes" => "總票數",
        "weighted.calculation" => "加權計算",
        "votes" => "票",
        "reason" => "原因",
        "weight" => "權重",
        "back.to.vote" => "返回投票",
        "poll.expired" => "已截止",
        "poll.deadline" => "截止",
        "poll.created.at" => "發起時間",

        "auth.loading" => "載入中...",
        "auth.sign.in" => "使用 Google 登入",
        "auth.sign.out" => "登出",

        "notice.dismiss" => "關閉",
        "notice.load.failed" => "錯誤",
        "notice.poll.created" => "投票建立成功",
        "notice.poll.created.detail" => "您的投票已經建立並發布",
        "notice.create.failed" => "建立失敗",
        "notice.vote.recorded" => "投票成功",
        "notice.vote.recorded.detail" => "您的投票已經記錄",
        "notice.vote.failed" => "投票失敗",
        "notice.sign.in.first" => "請先登入",
        "notice.already.voted" => "已經投過票",

        "error.validation" => "請填寫主題並至少提供兩個選項",
        "error.auth.required" => "您需要登入才能進行此操作",
        "error.already.voted" => "您已經在這個投票中投過票了",
        "error.poll.closed" => "這個投票已經截止",
        "error.not.found" => "找不到這個投票",
        "error.rate.limited" => "操作太頻繁，請稍後再試",
        "error.try.later" => "請稍後再試",
        "error.load.polls" => "無法載入投票",

        "language.toggle" => "English",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "voting.system" => "Voting System",
        "voting.description" => {
            "Create polls or participate in voting. Votes with reasons have higher weight"
        }
        "create.new.poll" => "Create New Poll",
        "cancel.create" => "Cancel Create",
        "no.polls" => "No polls yet, create the first one!",
        "no.my.polls" => "You have not created any polls yet",
        "tab.all" => "All Polls",
        "tab.mine" => "My Polls",
        "loading.polls" => "Loading polls...",

        "create.poll.form" => "Create New Poll",
        "poll.title" => "Poll Title",
        "poll.title.placeholder" => "Enter poll title...",
        "poll.description" => "Description (Optional)",
        "poll.description.placeholder" => "Enter poll description...",
        "poll.options" => "Poll Options",
        "option.placeholder" => "Option",
        "add.option" => "Add Option",
        "remove.option" => "Remove option",
        "poll.expires" => "Closes at (Optional)",
        "create.poll" => "Create Poll",
        "creating" => "Creating...",

        "vote.reason" => "Voting Reason (Optional, providing reason increases vote weight)",
        "vote.reason.bonus" => "(double weight)",
        "vote.reason.placeholder" => "Please explain your voting reason...",
        "vote" => "Vote",
        "voting" => "Voting...",
        "view.results" => "View Results",
        "voting.results" => "Voting Results",
        "total.votes" => "Total Votes",
        "weighted.calculation" => "Weighted",
        "votes" => "votes",
        "reason" => "Reason",
        "weight" => "Weight",
        "back.to.vote" => "Back to Vote",
        "poll.expired" => "Closed",
        "poll.deadline" => "Closes",
        "poll.created.at" => "Created",

        "auth.loading" => "Loading...",
        "auth.sign.in" => "Sign in with Google",
        "auth.sign.out" => "Sign out",

        "notice.dismiss" => "Dismiss",
        "notice.load.failed" => "Error",
        "notice.poll.created" => "Poll created",
        "notice.poll.created.detail" => "Your poll has been created and published",
        "notice.create.failed" => "Creation failed",
        "notice.vote.recorded" => "Vote recorded",
        "notice.vote.recorded.detail" => "Your vote has been recorded",
        "notice.vote.failed" => "Vote failed",
        "notice.sign.in.first" => "Please sign in",
        "notice.already.voted" => "Already voted",

        "error.validation" => "Enter a title and at least two options",
        "error.auth.required" => "You need to sign in to do that",
        "error.already.voted" => "You have already voted in this poll",
        "error.poll.closed" => "This poll is closed",
        "error.not.found" => "This poll could not be found",
        "error.rate.limited" => "Too many requests, please slow down",
        "error.try.later" => "Please try again later",
        "error.load.polls" => "Could not load polls",

        "language.toggle" => "中文",
        _ => return None,
    })
}

/// Current locale, shared through context.
#[derive(Debug, Clone, Copy)]
pub struct I18n {
    locale: RwSignal<Locale>,
}

impl I18n {
    pub fn provide() -> Self {
        let i18n = Self {
            locale: RwSignal::new(Locale::default()),
        };
        provide_context(i18n);
        i18n
    }

    pub fn locale(&self) -> Locale {
        self.locale.get()
    }

    pub fn t(&self, key: &'static str) -> &'static str {
        translate(self.locale.get(), key)
    }

    pub fn toggle(&self) {
        self.locale.update(|locale| *locale = locale.other());
    }
}

pub fn use_i18n() -> I18n {
    expect_context::<I18n>()
}
